//! A standalone dispatch point.

use bellhop_core::{DispatchHost, Failure, Registry, Value};
use std::fmt;

/// A host with no state besides its registry.
///
/// Useful when several unrelated components want to meet at a shared
/// dispatch point instead of each becoming a host.
///
/// # Example
///
/// ```rust,ignore
/// use bellhop::{Bus, Dispatch};
///
/// let mut bus = Bus::new();
/// bus.register("greet", |_, args| {
///     println!("hello {}", args[0]);
///     true
/// });
/// bus.invoke("greet", &["world".into()])?;
/// ```
pub struct Bus<A = Value>
where
    A: From<Failure> + 'static,
{
    registry: Option<Registry<Self>>,
}

impl<A> Bus<A>
where
    A: From<Failure> + 'static,
{
    /// Create a bus with no handlers.
    pub fn new() -> Self {
        Self { registry: None }
    }
}

impl<A> Default for Bus<A>
where
    A: From<Failure> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> DispatchHost for Bus<A>
where
    A: From<Failure> + 'static,
{
    type Arg = A;

    fn registry(&self) -> Option<&Registry<Self>> {
        self.registry.as_ref()
    }

    fn registry_mut(&mut self) -> Option<&mut Registry<Self>> {
        self.registry.as_mut()
    }

    fn set_registry(&mut self, registry: Registry<Self>) -> &mut Registry<Self> {
        self.registry.insert(registry)
    }
}

impl<A> fmt::Debug for Bus<A>
where
    A: From<Failure> + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("registry", &self.registry)
            .finish()
    }
}
