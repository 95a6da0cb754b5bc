use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 安裝 Ctrl-C 處理器，回傳共享的中斷旗標
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        request_shutdown(&signal_clone);
        eprintln!("\n收到中斷信號，處理完目前的影片後停止...");
    })
    .expect("無法設定 Ctrl-C 處理器");

    shutdown_signal
}

pub fn request_shutdown(signal: &AtomicBool) {
    signal.store(true, Ordering::SeqCst);
}

#[must_use]
pub fn is_shutdown_requested(signal: &AtomicBool) -> bool {
    signal.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shutdown() {
        let signal = AtomicBool::new(false);
        assert!(!is_shutdown_requested(&signal));
        request_shutdown(&signal);
        assert!(is_shutdown_requested(&signal));
    }
}
