use crate::core::{ItemStore, MediaSource, MotionState, OrbitControls, Placement, ReleaseMedia};
use crate::library::MediaLibrary;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Revokes object URLs once the store lets go of them.
pub struct ObjectUrlRevoker;

impl ReleaseMedia for ObjectUrlRevoker {
    fn release(&mut self, source: &MediaSource) {
        if !source.needs_release() {
            return;
        }
        if let Err(e) = web::Url::revoke_object_url(source.as_str()) {
            log::warn!("[store] revoke failed for {}: {:?}", source.as_str(), e);
        }
    }
}

/// Shared handles for the running page, created once in `init` and cloned
/// into every event closure.
#[derive(Clone)]
pub struct Session {
    pub document: web::Document,
    pub store: Rc<RefCell<ItemStore>>,
    pub library: Rc<RefCell<MediaLibrary>>,
    pub motion: Rc<RefCell<MotionState>>,
    pub orbit: Rc<RefCell<OrbitControls>>,
}

impl Session {
    pub fn new(document: web::Document, placement: Placement) -> Self {
        // Fixed placement only ever holds inline data URLs
        let store = match placement {
            Placement::Fixed => ItemStore::new(placement),
            Placement::Ring(_) => ItemStore::with_releaser(placement, Box::new(ObjectUrlRevoker)),
        };
        Self {
            document,
            store: Rc::new(RefCell::new(store)),
            library: Rc::new(RefCell::new(MediaLibrary::default())),
            motion: Rc::new(RefCell::new(MotionState::new())),
            orbit: Rc::new(RefCell::new(OrbitControls::default())),
        }
    }

    /// Re-render the control panel after any store change.
    pub fn changed(&self) {
        overlay::render(&self.document, &self.store.borrow());
    }
}
