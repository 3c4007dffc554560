fn main() {
    if let Err(err) = bootstore::cli::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
