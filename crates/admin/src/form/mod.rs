//! The product form: draft state, its action reducer, and the editor that
//! composes the catalog stores with the store API.

pub mod draft;
pub mod editor;
pub mod save;

pub use draft::{FormAction, ProductDraft};
pub use editor::{EditorMode, ProductEditor};
pub use save::SaveOutcome;
