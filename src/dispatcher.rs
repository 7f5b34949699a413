use std::sync::mpsc;

use crate::event::AgentEvent;

pub trait Dispatcher {
    fn dispatch(&self, event: AgentEvent);
}

impl Dispatcher for mpsc::Sender<AgentEvent> {
    fn dispatch(&self, event: AgentEvent) {
        let _ = self.send(event);
    }
}
