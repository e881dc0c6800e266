use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::fmt::format;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::prelude::*;

/// Directives applied on top of the default level
const EXTRA_DIRECTIVES: &[&str] = &[
    // Session start, completion and cancellation
    "lootboard::targeting=info",
    "bevy_winit::system=info",
    // Suppress very noisy render layer messages completely
    "wgpu_core=error",
    "wgpu_hal=error",
    "bevy_render=error",
];

/// Custom logger initialization to exclude timestamps but keep colors.
///
/// Use LOOTBOARD_LOG=info or LOOTBOARD_LOG=debug to increase verbosity.
/// Example: LOOTBOARD_LOG=debug cargo run
pub fn init_custom_logger() {
    // Empty time formatter that doesn't print anything
    struct EmptyTime;
    impl FormatTime for EmptyTime {
        fn format_time(
            &self,
            _: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            Ok(())
        }
    }

    let default_level =
        std::env::var("LOOTBOARD_LOG").unwrap_or_else(|_| "warn".to_string());

    let format = format()
        .with_timer(EmptyTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_filter(build_filter(&default_level)),
        )
        .init();
}

/// Environment filter for `level`. Unparseable directives are skipped
fn build_filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    let directives = std::iter::once(level).chain(EXTRA_DIRECTIVES.iter().copied());
    for directive in directives {
        match directive.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive '{directive}': {e}"),
        }
    }
    filter
}
