//! The query-data-model seam.
//!
//! The data model owning parsed dataset contents lives outside this crate;
//! the engine only needs dimension sizes, animation flags, the fetch trigger,
//! and a read-only view of the descriptor it was built from.

use std::rc::Rc;

use crate::descriptor::model::Descriptor;

/// External component owning parsed dataset contents and dimension metadata.
///
/// One model per page load, owned exclusively by the resolved viewer.
pub trait QueryDataModel {
    /// Kick off an asynchronous fetch of the dataset contents. Completion is
    /// delivered through the model's own data-ready machinery, never polled.
    fn fetch_data(&self);

    /// Size of a named dimension, if the dataset declares it.
    ///
    /// Callers must not cache the result: the time extent can grow while an
    /// in-situ run is still producing data.
    fn get_size(&self, dimension: &str) -> Option<usize>;

    /// Toggle animation of a named query argument.
    fn set_animation_flag(&self, argument: &str, animate: bool);

    /// Read-only view of the raw descriptor this model was built from.
    fn original_data(&self) -> &Descriptor;
}

/// Constructs a query data model for a freshly parsed descriptor.
pub trait QueryDataModelFactory {
    fn create(&self, descriptor: &Descriptor, base_path: &str) -> Rc<dyn QueryDataModel>;
}
