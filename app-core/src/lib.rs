#![warn(clippy::all, rust_2018_idioms)]

//! Plumbing shared by the chart frontend: a backend event loop running on
//! its own thread, the links that carry requests to it and answers back,
//! and the event abstraction the UI queue is built on.

pub mod backend;
pub mod event;
pub mod frontend;
pub mod string_error;

pub const BACKEND_HUNG_UP_MSG: &str = "backend event loop hung up";

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use log::trace;

    use crate::backend::{request_stop, BackendEventLoop, BackendLink, BackendState};
    use crate::frontend::UIParameter;

    #[derive(Default)]
    struct TestState {
        loads: usize,
    }
    impl BackendState for TestState {}

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_cancel_request_working() {
        init();

        let (request_tx, request_rx) = std::sync::mpsc::channel();
        let eventloop_handle = BackendEventLoop::new(request_rx, TestState::default()).run();

        let tic = Instant::now();

        let (rx, linker) = BackendLink::new("slow load", |_: &mut BackendEventLoop<TestState>| {
            std::thread::sleep(Duration::from_millis(1000));
        });

        // Dropping the receiver cancels the request, so the backend must
        // skip the slow action entirely.
        drop(rx);
        trace!("drop of receiver done");
        assert!(linker.is_cancelled());
        request_tx.send(Box::new(linker)).unwrap();
        // Joins the event loop thread, which would block for the full
        // second if the cancelled action ran anyway.
        request_stop(&request_tx, eventloop_handle);
        assert!(tic.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_parameter_receives_backend_answer() {
        init();

        let (mut request_tx, request_rx) = std::sync::mpsc::channel();
        let eventloop_handle = BackendEventLoop::new(request_rx, TestState::default()).run();

        let mut param = UIParameter::new(0usize);
        BackendLink::request_parameter_update(
            &mut param,
            "count loads",
            |b: &mut BackendEventLoop<TestState>| {
                b.state.loads += 1;
                b.state.loads
            },
            &mut request_tx,
        );
        assert!(!param.is_up_to_date());

        let tic = Instant::now();
        while !param.try_update() {
            assert!(tic.elapsed() < Duration::from_secs(5), "no answer from backend");
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(param.is_up_to_date());
        assert_eq!(*param.value(), 1);

        request_stop(&request_tx, eventloop_handle);
    }
}
