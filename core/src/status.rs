/// One of the four remote-call controllers, each owning a status line and a
/// trigger button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Generate,
    Analyze,
    Recreate,
    Refine,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Generate,
        Channel::Analyze,
        Channel::Recreate,
        Channel::Refine,
    ];

    pub fn index(self) -> usize {
        match self {
            Channel::Generate => 0,
            Channel::Analyze => 1,
            Channel::Recreate => 2,
            Channel::Refine => 3,
        }
    }

    pub fn failure_prefix(self) -> &'static str {
        match self {
            Channel::Generate => "Generation failed",
            Channel::Analyze => "Analysis failed",
            Channel::Recreate => "Recreation failed",
            Channel::Refine => "Refinement failed",
        }
    }

    pub fn success_text(self) -> &'static str {
        match self {
            Channel::Generate => "SVG generated successfully!",
            Channel::Analyze => "Analysis complete!",
            Channel::Recreate => "Recreation successful!",
            Channel::Refine => "Refinement successful!",
        }
    }
}

/// Idle → Pending → (Succeeded | Failed) → Idle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CallPhase {
    #[default]
    Idle,
    Pending(String),
    Succeeded(String),
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Status {
    phase: CallPhase,
    generation: u64,
}

impl Status {
    pub fn phase(&self) -> &CallPhase {
        &self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, CallPhase::Pending(_))
    }

    pub fn text(&self) -> &str {
        match &self.phase {
            CallPhase::Idle => "",
            CallPhase::Pending(text) | CallPhase::Succeeded(text) | CallPhase::Failed(text) => text,
        }
    }

    pub fn tone(&self) -> Option<Tone> {
        match self.phase {
            CallPhase::Idle => None,
            CallPhase::Pending(_) => Some(Tone::Info),
            CallPhase::Succeeded(_) => Some(Tone::Success),
            CallPhase::Failed(_) => Some(Tone::Error),
        }
    }

    pub fn pending(&mut self, text: impl Into<String>) -> u64 {
        self.set(CallPhase::Pending(text.into()))
    }

    pub fn succeed(&mut self, text: impl Into<String>) -> u64 {
        self.set(CallPhase::Succeeded(text.into()))
    }

    pub fn fail(&mut self, text: impl Into<String>) -> u64 {
        self.set(CallPhase::Failed(text.into()))
    }

    pub fn reset(&mut self) -> u64 {
        self.set(CallPhase::Idle)
    }

    /// Timer-driven auto-clear. Only a success entry that has not been
    /// superseded since `generation` returns to Idle; failures persist.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || !matches!(self.phase, CallPhase::Succeeded(_)) {
            return false;
        }
        self.phase = CallPhase::Idle;
        true
    }

    fn set(&mut self, phase: CallPhase) -> u64 {
        self.phase = phase;
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
