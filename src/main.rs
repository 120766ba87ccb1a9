use smart_calc::repl;

/// Diagnostics go to stderr and only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=smart_calc=debug`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() -> std::io::Result<()> {
    init_tracing();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    repl::run(stdin.lock(), &mut stdout.lock())
}
