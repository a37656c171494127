//! Items referenced by `derive(Entity)` output. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    use crate::registry::{Entity, FieldRegistry};

    pub use inventory;

    /// A registration function submitted by `#[entity(auto_register)]`.
    pub struct __AutoRegisterFunc(pub fn(&mut FieldRegistry) -> bool);

    inventory::collect!(__AutoRegisterFunc);

    /// Monomorphic registration entry for `T`.
    #[inline]
    pub fn __register<T: Entity>(registry: &mut FieldRegistry) -> bool {
        registry.register::<T>()
    }

    pub(crate) fn __register_types(registry: &mut FieldRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}
