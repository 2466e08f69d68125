fn main() {
    if let Err(err) = tasklist::cli::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
