//! gui/subscription.rs
//! Timers: drain engine events often, refresh position once a second
//! while media is loaded.

use iced::{Subscription, time};

use super::state::{Message, Player};

pub(crate) fn subscription(state: &Player) -> Subscription<Message> {
    let config = state.controller.config();

    let poll = time::every(config.engine_poll_period).map(|_| Message::EnginePoll);
    if !state.controller.refresh_active() {
        return poll;
    }

    let refresh = time::every(config.refresh_period).map(|_| Message::Refresh);
    Subscription::batch([poll, refresh])
}
