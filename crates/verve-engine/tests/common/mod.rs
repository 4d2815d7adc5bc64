#![allow(dead_code)]

use verve_engine::{Engine, KeyModifiers, StringBuffer};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fresh engine + in-memory buffer seeded with `text`.
pub fn fixture(text: &str) -> (Engine, StringBuffer) {
    init_tracing();
    (Engine::new(), StringBuffer::new(text))
}

/// Feed a concatenated key-token string (same syntax as keymap sequences:
/// `<CR>` and `ctrl-x` are single tokens).
pub fn feed(engine: &mut Engine, buf: &mut StringBuffer, keys: &str) {
    for tok in verve_engine::split_tokens(keys) {
        engine.handle_key(buf, &tok, KeyModifiers::empty());
    }
}

pub fn press(engine: &mut Engine, buf: &mut StringBuffer, token: &str) -> bool {
    engine.handle_key(buf, token, KeyModifiers::empty())
}

pub fn line_count(text: &str) -> usize {
    text.lines().count()
}
