//! Seams between the sequencer and the host document/environment.
//!
//! Everything is `Rc`-shared and single-threaded: the host runs one event loop
//! and all writers live on it.

use std::rc::Rc;

use crate::{
    app_types::{EnvironmentFlag, EnvironmentPreference, RenderFailure},
    errors::RegistrationError,
    fallback_panel::FallbackPanel,
};

pub trait FlagSink {
    fn set(&self, flag: EnvironmentFlag);
    fn clear(&self, flag: EnvironmentFlag);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(pub i32);

/// One-shot delayed tasks; a task may run later than `delay_ms`, never earlier.
pub trait TaskScheduler {
    fn schedule(&self, task: Box<dyn FnOnce()>, delay_ms: u32) -> TaskHandle;
}

pub trait PreferenceQueries {
    fn matches(&self, preference: EnvironmentPreference) -> bool;
}

pub trait InputEvents {
    fn on_keydown(&self, listener: Box<dyn FnMut(&str)>);
    fn on_mousedown(&self, listener: Box<dyn FnMut()>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub id: String,
}

pub trait DocumentSurface {
    fn ready_state(&self) -> String;
    fn find_mount_point(&self, id: &str) -> Option<MountPoint>;
    fn body_html_excerpt(&self, limit: usize) -> String;
    /// Replaces the whole body; nothing previously mounted may survive.
    fn replace_body(&self, panel: &FallbackPanel);
    fn replace_mount_contents(&self, mount: &MountPoint, panel: &FallbackPanel);
}

pub type RegistrationCallback = Box<dyn FnOnce(Result<(), RegistrationError>)>;

pub trait UpdateClient {
    fn register(&self, on_complete: RegistrationCallback);
}

pub trait AppRenderer {
    fn render(&mut self, mount: &MountPoint) -> Result<(), RenderFailure>;
}

impl<F> AppRenderer for F
where
    F: FnMut(&MountPoint) -> Result<(), RenderFailure>,
{
    fn render(&mut self, mount: &MountPoint) -> Result<(), RenderFailure> {
        self(mount)
    }
}

#[derive(Clone)]
pub struct BootstrapHost {
    pub flags: Rc<dyn FlagSink>,
    pub scheduler: Rc<dyn TaskScheduler>,
    pub preferences: Rc<dyn PreferenceQueries>,
    pub input: Rc<dyn InputEvents>,
    pub document: Rc<dyn DocumentSurface>,
    pub update_client: Rc<dyn UpdateClient>,
}
