//! `kmdgen` executable.

fn main() {
    kmdgen_cli::init_tracing();
    std::process::exit(kmdgen_cli::run_cli(std::env::args().collect()));
}
