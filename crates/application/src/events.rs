use filter_studio_domain::ParameterName;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ImageLoaded { width: u32, height: u32 },
    ParameterChanged { name: ParameterName, value: f32 },
    PresetApplied { preset: &'static str },
    Saved { gallery_len: usize },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEventKind {
    ImageLoaded,
    ParameterChanged,
    PresetApplied,
    Saved,
    Reset,
}

impl SessionEvent {
    pub fn kind(&self) -> SessionEventKind {
        match self {
            Self::ImageLoaded { .. } => SessionEventKind::ImageLoaded,
            Self::ParameterChanged { .. } => SessionEventKind::ParameterChanged,
            Self::PresetApplied { .. } => SessionEventKind::PresetApplied,
            Self::Saved { .. } => SessionEventKind::Saved,
            Self::Reset => SessionEventKind::Reset,
        }
    }
}

pub type EventHandler = Box<dyn Fn(&SessionEvent)>;

/// Synchronous dispatch of session events to handlers registered per kind.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SessionEventKind, EventHandler)>,
}

impl EventBus {
    pub fn subscribe(&mut self, kind: SessionEventKind, handler: EventHandler) {
        self.handlers.push((kind, handler));
    }

    pub fn dispatch(&self, event: &SessionEvent) {
        log::debug!("session event: {event:?}");
        let kind = event.kind();
        for (_, handler) in self.handlers.iter().filter(|(wanted, _)| *wanted == kind) {
            handler(event);
        }
    }
}
