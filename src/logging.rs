use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// The filter comes from `RUST_LOG` (env_logger syntax, e.g.
/// "icon_compose=debug") and defaults to `info`. Records are written to
/// stdout as bare messages.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder
            .target(env_logger::Target::Stdout)
            .format(|buf, record| writeln!(buf, "{}", record.args()));

        builder.init();

        log::debug!("logging initialized");
    });
}
