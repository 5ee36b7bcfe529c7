use std::process::ExitCode;

fn main() -> ExitCode {
    crumbcast_observability::init();
    crumbcast_cli::run()
}
