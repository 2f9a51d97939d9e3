// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are reduced to the few the app reacts to globally: back
//! input, the main window becoming known and window resizes. Everything else is handled by
//! the widgets themselves.

use super::config::TICK_INTERVAL;
use super::Message;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, mouse, time, window, Subscription};

/// Routes back input and window lifecycle events.
///
/// Escape only counts when no widget captured it (a focused text input
/// keeps it).
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { .. }) => {
            Some(Message::WindowOpened(window_id))
        }
        event::Event::Window(window::Event::Resized(_)) => Some(Message::WindowResized(window_id)),
        event::Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Escape),
            ..
        }) if status == event::Status::Ignored => Some(Message::Back),
        event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Back)) => {
            Some(Message::Back)
        }
        _ => None,
    })
}

/// Creates the periodic tick driving toast auto-dismiss, the back-press
/// window and the player controls timer. Idle when none of them runs.
pub fn create_tick_subscription(active: bool) -> Subscription<Message> {
    if active {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
