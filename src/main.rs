fn main() {
    env_logger::init();
    let matches = devform::cli::parse_args();

    if let Err(err) = devform::cli::actions::run_one_shot_actions(&matches) {
        log::error!("{err:?}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
