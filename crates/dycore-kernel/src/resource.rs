//! Single-instance guard for kernels with process-wide state.
//!
//! A [`KernelResource`] stands for one underlying kernel's global state.
//! At most one [`KernelLease`] on it can be alive; the adapter takes the
//! lease at construction and releases it on drop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::KernelError;

/// Identity and in-use flag of a kernel's process-wide state.
#[derive(Debug)]
pub struct KernelResource {
    name: String,
    in_use: AtomicBool,
}

impl KernelResource {
    /// A new, unleased resource.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            in_use: AtomicBool::new(false),
        })
    }

    /// Resource name, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a lease is currently held.
    pub fn is_leased(&self) -> bool {
        self.in_use.load(Ordering::Acquire)
    }
}

/// Exclusive claim on a [`KernelResource`]. Released on drop.
#[derive(Debug)]
pub struct KernelLease {
    resource: Arc<KernelResource>,
}

impl KernelLease {
    /// Claim `resource`.
    ///
    /// # Errors
    ///
    /// [`KernelError::Busy`] if another lease is alive.
    pub fn acquire(resource: Arc<KernelResource>) -> Result<Self, KernelError> {
        resource
            .in_use
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| KernelError::Busy {
                resource: resource.name.clone(),
            })?;
        Ok(Self { resource })
    }

    /// The leased resource.
    pub fn resource(&self) -> &KernelResource {
        &self.resource
    }
}

impl Drop for KernelLease {
    fn drop(&mut self) {
        self.resource.in_use.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lease_is_busy_until_first_drops() {
        let resource = KernelResource::new("gfs");
        let first = KernelLease::acquire(Arc::clone(&resource)).unwrap();
        assert!(resource.is_leased());

        let err = KernelLease::acquire(Arc::clone(&resource)).unwrap_err();
        assert_eq!(
            err,
            KernelError::Busy {
                resource: "gfs".into()
            }
        );

        drop(first);
        assert!(!resource.is_leased());
        let again = KernelLease::acquire(Arc::clone(&resource)).unwrap();
        assert_eq!(again.resource().name(), "gfs");
    }

    #[test]
    fn distinct_resources_are_independent() {
        let a = KernelResource::new("a");
        let b = KernelResource::new("b");
        let _la = KernelLease::acquire(a).unwrap();
        assert!(KernelLease::acquire(b).is_ok());
    }

    #[test]
    fn contended_acquire_admits_one() {
        let resource = KernelResource::new("shared");
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let r = Arc::clone(&resource);
                std::thread::spawn(move || KernelLease::acquire(r).ok())
            })
            .collect();
        let leases: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        // Leases returned from threads are still alive here.
        assert_eq!(leases.iter().filter(|l| l.is_some()).count(), 1);
    }
}
