#[derive(Debug, Clone)]
pub enum PlaygroundEvent {
    Created {
        code: String,
        host: String,
    },
    PlayerJoined {
        code: String,
        username: String,
    },
    PlayerLeft {
        code: String,
        username: String,
    },
    Started {
        code: String,
        letter: char,
    },
    AnswersSubmitted {
        code: String,
        username: String,
        round: u32,
    },
    RoundAdvanced {
        code: String,
        round: u32,
        letter: char,
    },
    Finished {
        code: String,
    },
    Restarted {
        code: String,
        letter: char,
    },
}

impl PlaygroundEvent {
    pub fn code(&self) -> &str {
        match self {
            PlaygroundEvent::Created { code, .. } => code,
            PlaygroundEvent::PlayerJoined { code, .. } => code,
            PlaygroundEvent::PlayerLeft { code, .. } => code,
            PlaygroundEvent::Started { code, .. } => code,
            PlaygroundEvent::AnswersSubmitted { code, .. } => code,
            PlaygroundEvent::RoundAdvanced { code, .. } => code,
            PlaygroundEvent::Finished { code } => code,
            PlaygroundEvent::Restarted { code, .. } => code,
        }
    }
}

/// Event handler trait for observing playground mutations, e.g. a gateway
/// re-streaming state to subscribed clients.
pub trait PlaygroundEventHandler: Send {
    fn handle_event(&mut self, event: PlaygroundEvent);
}

/// Simple event bus for distributing playground events
pub struct PlaygroundEventBus {
    handlers: Vec<Box<dyn PlaygroundEventHandler>>,
}

impl PlaygroundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn PlaygroundEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: PlaygroundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for PlaygroundEventBus {
    fn default() -> Self {
        Self::new()
    }
}
