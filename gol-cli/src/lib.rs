use tracing_subscriber::EnvFilter;

/// Installs the `tracing-subscriber` `fmt` layer every binary uses, with
/// verbosity controlled by `RUST_LOG`. Library crates never do this
/// themselves -- only the process entrypoint does, once.
pub fn install_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Pulls the next positional argument off `args`, exiting the process
/// with `usage` printed to stderr if it's missing. Deliberately not a
/// general-purpose parser -- each binary takes a fixed, small number of
/// positional arguments and nothing else.
pub fn next_arg(args: &mut impl Iterator<Item = String>, usage: &str) -> String {
    match args.next() {
        Some(arg) => arg,
        None => {
            eprintln!("{usage}");
            std::process::exit(1);
        }
    }
}

/// Same as [`next_arg`], parsed as the given numeric type.
pub fn next_arg_parsed<T: std::str::FromStr>(args: &mut impl Iterator<Item = String>, usage: &str) -> T {
    let raw = next_arg(args, usage);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("{usage}");
            std::process::exit(1);
        }
    }
}

/// Maps a terminal `gol_base::Result` to the exit code of a role: `0` for
/// a clean return, `1` for any propagated error, logging it first.
pub fn exit_code<T>(result: gol_base::Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("{e:?}");
            1
        }
    }
}
