use std::collections::HashMap;

use crate::{
    foundation::error::{FlipbookError, FlipbookResult},
    playback::engine::SpriteAnimation,
    surface::controller::Surface,
};

/// Host-facing command operating on a registered animation instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Construct the instance if absent; no-op otherwise.
    Init,
    /// Start playback.
    Play,
    /// Stop playback.
    Stop,
    /// Change the playback rate, restarting a live timer.
    SetFrameRate(f64),
}

impl Command {
    /// Parse a host action name and optional argument.
    ///
    /// Recognized actions: `init`, `play`, `stop`, `fps` (requires a numeric
    /// argument). Anything else is a usage error.
    pub fn parse(action: &str, arg: Option<&str>) -> FlipbookResult<Self> {
        match action {
            "init" => Ok(Self::Init),
            "play" => Ok(Self::Play),
            "stop" => Ok(Self::Stop),
            "fps" => {
                let raw = arg
                    .ok_or_else(|| FlipbookError::usage("action 'fps' requires a value"))?;
                let fps = raw.trim().parse::<f64>().map_err(|_| {
                    FlipbookError::usage(format!("fps value '{raw}' is not a number"))
                })?;
                Ok(Self::SetFrameRate(fps))
            }
            other => Err(FlipbookError::usage(format!("invalid action '{other}'"))),
        }
    }
}

/// Registry of engine instances keyed by the identity of their host surface.
///
/// `init_with` looks up or constructs, so an instance is never built twice
/// for the same surface; ownership stays here rather than in ambient
/// host-element state.
pub struct AnimationRegistry<S: Surface> {
    instances: HashMap<String, SpriteAnimation<S>>,
}

impl<S: Surface> Default for AnimationRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> AnimationRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Look up the instance for `key`, constructing it with `build` when
    /// absent.
    ///
    /// A failing `build` leaves the registry unchanged.
    pub fn init_with(
        &mut self,
        key: impl Into<String>,
        build: impl FnOnce() -> FlipbookResult<SpriteAnimation<S>>,
    ) -> FlipbookResult<&mut SpriteAnimation<S>> {
        use std::collections::hash_map::Entry;
        match self.instances.entry(key.into()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(build()?)),
        }
    }

    /// Borrow a registered instance.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut SpriteAnimation<S>> {
        self.instances.get_mut(key)
    }

    /// Remove an instance, tearing down its playback state.
    pub fn remove(&mut self, key: &str) -> Option<SpriteAnimation<S>> {
        self.instances.remove(key)
    }

    /// Apply a command to a previously constructed instance.
    ///
    /// Unknown keys are usage errors and mutate no engine state.
    /// [`Command::Init`] on a registered instance is a no-op; use
    /// [`Self::init_with`] to construct.
    pub fn dispatch(&mut self, key: &str, command: Command) -> FlipbookResult<()> {
        let engine = self
            .instances
            .get_mut(key)
            .ok_or_else(|| FlipbookError::usage(format!("no animation registered for '{key}'")))?;
        match command {
            Command::Init => Ok(()),
            Command::Play => {
                engine.play();
                Ok(())
            }
            Command::Stop => {
                engine.stop();
                Ok(())
            }
            Command::SetFrameRate(fps) => engine.set_frame_rate(fps),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/registry.rs"]
mod tests;
