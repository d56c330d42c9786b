use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use super::composer::SceneComposer;
use crate::core::{FrameLoop, SubscriptionId};

/// A composer wired into a host frame loop
///
/// Holds the only strong reference to the scene; the frame callbacks keep
/// weak ones. [`unmount`](Self::unmount) is the only teardown: dropping the
/// handle instead leaves its callbacks registered as no-ops until the
/// `FrameLoop` itself is dropped.
#[must_use = "call `unmount` to remove the scene's frame callbacks"]
#[derive(Debug)]
pub struct MountedScene {
    scene: Rc<RefCell<SceneComposer>>,
    subscriptions: Vec<SubscriptionId>,
}

impl SceneComposer {
    /// Register one frame callback per animated group
    pub fn mount(self, frame_loop: &mut FrameLoop) -> MountedScene {
        let groups = self.arena().animated_groups();
        let scene = Rc::new(RefCell::new(self));

        let subscriptions: Vec<SubscriptionId> = groups
            .into_iter()
            .map(|group| {
                let weak: Weak<RefCell<SceneComposer>> = Rc::downgrade(&scene);
                frame_loop.subscribe(move |frame| {
                    if let Some(scene) = weak.upgrade() {
                        scene.borrow_mut().update_group(group, frame.time);
                    }
                })
            })
            .collect();

        log::info!("scene mounted with {} frame callbacks", subscriptions.len());
        MountedScene {
            scene,
            subscriptions,
        }
    }
}

impl MountedScene {
    pub fn scene(&self) -> Ref<'_, SceneComposer> {
        self.scene.borrow()
    }

    pub fn subscriptions(&self) -> &[SubscriptionId] {
        &self.subscriptions
    }

    /// Remove every callback and release the scene's primitives
    ///
    /// Returns the number of callbacks still registered on `frame_loop`.
    pub fn unmount(self, frame_loop: &mut FrameLoop) -> usize {
        let removed = self
            .subscriptions
            .iter()
            .filter(|id| frame_loop.unsubscribe(**id))
            .count();

        self.scene.borrow_mut().release();
        log::info!(
            "scene unmounted: {removed} callbacks removed, {} remain",
            frame_loop.len()
        );
        frame_loop.len()
    }
}
