//! # Supervised Generation
//!
//! One module's internal fault must not bring down a host serving many modules.
//! [`generate_supervised`] runs a generator behind `catch_unwind` and reports a
//! panic as [`GenerateError::InternalPanic`] carrying the panic message, the
//! backtrace captured at the panic site and the serialized request.

use super::{CancellationToken, Generator, GeneratorRequest, GeneratorResponse};
use crate::error::{GenerateError, Result};
use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use tracing::{debug, error, info};

thread_local! {
    static PANIC_BACKTRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Chain a panic hook that records the panicking thread's backtrace
///
/// The previous hook still runs, so default panic reporting is unchanged.
fn install_backtrace_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let backtrace = Backtrace::force_capture().to_string();
            PANIC_BACKTRACE.with(|slot| *slot.borrow_mut() = Some(backtrace));
            previous(info);
        }));
    });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run `generator` and convert any panic into a reported error
pub fn generate_supervised(
    generator: &dyn Generator,
    request: &GeneratorRequest,
    cancel: &CancellationToken,
) -> Result<GeneratorResponse> {
    install_backtrace_hook();
    let module = generator.name();
    info!(module, app = %request.app, "Generating resources...");

    match panic::catch_unwind(AssertUnwindSafe(|| generator.generate(request, cancel))) {
        Ok(Ok(response)) => {
            info!(
                module,
                app = %request.app,
                resources = response.resources.len(),
                "Generated resources"
            );
            Ok(response)
        }
        Ok(Err(e)) => {
            debug!(module, app = %request.app, error = %e, "Failed to generate module resources");
            Err(e)
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            let backtrace = PANIC_BACKTRACE
                .with(|slot| slot.borrow_mut().take())
                .unwrap_or_else(|| Backtrace::force_capture().to_string());
            let request = serde_json::to_string(request)
                .unwrap_or_else(|e| format!("<unserializable request: {e}>"));
            error!(module, %message, "Recovered from panic in module generator");
            Err(GenerateError::InternalPanic {
                module: module.to_string(),
                message,
                backtrace,
                request,
            })
        }
    }
}
