//! Ctrl-C / SIGTERM handling and the process exit code.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

static QUIT_REQUESTED: AtomicBool = AtomicBool::new(false);
static EXIT_CODE: AtomicI32 = AtomicI32::new(0);

pub fn should_quit() -> bool {
    QUIT_REQUESTED.load(Ordering::SeqCst)
}

pub fn request_quit() {
    QUIT_REQUESTED.store(true, Ordering::SeqCst);
}

pub fn exit_code() -> i32 {
    EXIT_CODE.load(Ordering::SeqCst)
}

pub fn set_exit_code(code: i32) {
    if code == 0 {
        return;
    }
    // Keep the first non-zero code.
    let _ = EXIT_CODE.compare_exchange(0, code, Ordering::SeqCst, Ordering::SeqCst);
}

#[cfg(unix)]
pub fn install() {
    use std::os::raw::c_int;
    const SIGINT: c_int = 2;
    const SIGTERM: c_int = 15;

    extern "C" fn handler(_sig: c_int) {
        // Flag only; no IO in signal context
        request_quit();
    }

    extern "C" {
        fn signal(sig: c_int, handler: extern "C" fn(c_int)) -> usize;
    }

    unsafe {
        let _ = signal(SIGINT, handler);
        let _ = signal(SIGTERM, handler);
    }
}

#[cfg(not(unix))]
pub fn install() {
    #[cfg(target_os = "windows")]
    unsafe {
        type HandlerRoutine = extern "system" fn(u32) -> i32;
        extern "system" {
            fn SetConsoleCtrlHandler(handler: Option<HandlerRoutine>, add: i32) -> i32;
        }
        extern "system" fn handler(_ctrl_type: u32) -> i32 {
            request_quit();
            1
        }
        let _ = SetConsoleCtrlHandler(Some(handler), 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_nonzero_exit_code_wins() {
        set_exit_code(0);
        set_exit_code(3);
        set_exit_code(5);
        assert_eq!(exit_code(), 3);
    }
}
