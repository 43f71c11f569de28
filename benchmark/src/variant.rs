// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark variants: one HTTP client under comparison.
//!
//! A variant is a name plus a setup closure. Setup receives the target URL,
//! builds whatever session or connection state the client needs, and returns
//! the work closure that owns that state. The harness times only the work
//! closure.

use std::fmt;

use clientbench_core::TargetUrl;

use crate::error::ClientError;

/// One timed unit of work: a single GET-equivalent request.
pub type Work = Box<dyn FnMut() -> Result<(), ClientError>>;

type Setup = Box<dyn Fn(&str) -> Result<Work, ClientError>>;

/// Box a closure as [`Work`].
pub fn work<F>(f: F) -> Work
where
    F: FnMut() -> Result<(), ClientError> + 'static,
{
    Box::new(f)
}

/// An entry in the benchmark catalog.
pub struct Variant {
    name: &'static str,
    setup: Setup,
}

impl Variant {
    pub fn new<S>(name: &'static str, setup: S) -> Self
    where
        S: Fn(&str) -> Result<Work, ClientError> + 'static,
    {
        Self {
            name,
            setup: Box::new(setup),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the untimed setup step for `url`.
    pub fn setup(&self, url: &TargetUrl) -> Result<Work, ClientError> {
        (self.setup)(url.as_str())
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_setup_receives_url() {
        let seen = Rc::new(Cell::new(0usize));
        let seen_in_setup = Rc::clone(&seen);
        let variant = Variant::new("len", move |url| {
            seen_in_setup.set(url.len());
            Ok(work(|| Ok(())))
        });

        let url = TargetUrl::new("http://localhost:5000/").unwrap();
        let mut w = variant.setup(&url).unwrap();
        w().unwrap();

        assert_eq!(seen.get(), "http://localhost:5000/".len());
        assert_eq!(variant.name(), "len");
    }

    #[test]
    fn test_work_keeps_state_between_calls() {
        let variant = Variant::new("counter", |_| {
            let mut calls = 0u32;
            Ok(work(move || {
                calls += 1;
                if calls > 2 {
                    return Err(ClientError::RequestNotCloneable);
                }
                Ok(())
            }))
        });

        let url = TargetUrl::new("x").unwrap();
        let mut w = variant.setup(&url).unwrap();
        assert!(w().is_ok());
        assert!(w().is_ok());
        assert!(w().is_err());
    }
}
