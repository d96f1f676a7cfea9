use slog::{o, Drain, Level, Logger};

/// Creates the root logger, writing to the terminal from a background thread.
pub fn logger(show_debug: bool) -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).chan_size(20_000).build().fuse();

    let level = if show_debug { Level::Debug } else { Level::Info };

    Logger::root(drain.filter_level(level).fuse(), o!())
}
