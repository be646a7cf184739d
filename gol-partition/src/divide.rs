use gol_grid::{Block, Cell, Partition};

/// The largest composite number `<= threads`, or `threads` itself when it
/// is already below 4 (too small for composite-aware splitting to matter).
fn floor_to_composite(threads: u32) -> u32 {
    if threads < 4 {
        return threads;
    }
    let mut nthread = 2;
    for number in 2..=threads {
        if !is_prime(number) {
            nthread = number;
        }
    }
    nthread
}

fn is_prime(number: u32) -> bool {
    if number < 2 {
        return false;
    }
    for factor in 2..number {
        if number % factor == 0 {
            return false;
        }
    }
    true
}

/// Ascending list of prime factors of `n` (with multiplicity).
fn prime_factors(mut n: u32) -> Vec<u32> {
    let mut factors = Vec::new();
    let mut factor = 2;
    while n != 1 {
        if n % factor == 0 {
            n /= factor;
            factors.push(factor);
        } else {
            factor += 1;
        }
    }
    factors
}

/// Split the grid into a grid of blocks: `nthread` (the largest composite
/// at most `threads`) is factored into a `vertical x horizontal` split
/// chosen so neither dimension strays far from `sqrt(nthread)`.
pub fn divide_to_blocks(threads: u32, width: u32, height: u32) -> Partition {
    if threads == 1 {
        return vec![Block::new(Cell::new(0, 0), Cell::new(width, height))];
    }
    let nthread = floor_to_composite(threads);
    let factors = prime_factors(nthread);
    let desired = (nthread as f64).sqrt();

    let mut vertical: u32 = 1;
    let mut horizontal: u32 = 1;
    let mut i = 0;
    while i < factors.len() {
        if (vertical as f64) < desired {
            vertical *= factors[factors.len() - i - 1];
            i += 1;
        } else {
            break;
        }
    }
    while i < factors.len() {
        horizontal *= factors[factors.len() - i - 1];
        i += 1;
    }

    let part_width = width as f64 / horizontal as f64;
    let part_height = height as f64 / vertical as f64;
    let mut blocks = Vec::with_capacity((horizontal * vertical) as usize);
    for y in 0..vertical {
        for x in 0..horizontal {
            let start = Cell::new(
                (x as f64 * part_width).round() as u32,
                (y as f64 * part_height).round() as u32,
            );
            let end = Cell::new(
                ((x + 1) as f64 * part_width).round() as u32,
                ((y + 1) as f64 * part_height).round() as u32,
            );
            blocks.push(Block::new(start, end));
        }
    }
    blocks
}
