//! Resize subscriptions.
//!
//! The UI is single threaded, so the registry is `Rc<RefCell<..>>` and is
//! neither `Send` nor `Sync`. Dropping a [`ResizeSubscription`] removes its
//! callback, so a torn-down view never sees another event.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut(u32)>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	callbacks: Vec<(u64, Rc<RefCell<Callback>>)>,
}

/// Dispatches window widths to subscribers
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use docsite_pages::listener::ResizeEvents;
///
/// let events = ResizeEvents::new();
/// let seen = Rc::new(Cell::new(0));
///
/// let sink = seen.clone();
/// let subscription = events.subscribe(move |width| sink.set(width));
/// events.emit(640);
/// assert_eq!(seen.get(), 640);
///
/// drop(subscription);
/// events.emit(1024);
/// assert_eq!(seen.get(), 640);
/// ```
#[derive(Clone, Default)]
pub struct ResizeEvents {
	registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for ResizeEvents {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResizeEvents")
			.field("subscribers", &self.subscriber_count())
			.finish()
	}
}

impl ResizeEvents {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `callback` until the returned handle is dropped.
	#[must_use = "the callback is removed as soon as the subscription is dropped"]
	pub fn subscribe(&self, callback: impl FnMut(u32) + 'static) -> ResizeSubscription {
		let mut registry = self.registry.borrow_mut();
		let id = registry.next_id;
		registry.next_id += 1;
		registry
			.callbacks
			.push((id, Rc::new(RefCell::new(Box::new(callback)))));

		ResizeSubscription {
			id,
			registry: Rc::downgrade(&self.registry),
		}
	}

	/// Delivers a width to every current subscriber, in subscription order.
	///
	/// Callbacks may subscribe or unsubscribe while being called; those
	/// changes take effect from the next event.
	pub fn emit(&self, width: u32) {
		let callbacks: Vec<_> = self
			.registry
			.borrow()
			.callbacks
			.iter()
			.map(|(_, cb)| cb.clone())
			.collect();

		for callback in callbacks {
			// A callback that re-enters `emit` for itself is skipped.
			if let Ok(mut callback) = callback.try_borrow_mut() {
				callback(width);
			}
		}
	}

	pub fn subscriber_count(&self) -> usize {
		self.registry.borrow().callbacks.len()
	}
}

/// Handle that unsubscribes on drop
#[derive(Debug)]
pub struct ResizeSubscription {
	id: u64,
	registry: Weak<RefCell<Registry>>,
}

impl Drop for ResizeSubscription {
	fn drop(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry
				.borrow_mut()
				.callbacks
				.retain(|(id, _)| *id != self.id);
		}
	}
}

/// Forwards the browser window's `resize` events into a [`ResizeEvents`]
///
/// The DOM listener is removed when this value is dropped.
#[cfg(target_arch = "wasm32")]
pub struct WindowResizeListener {
	window: web_sys::Window,
	closure: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(target_arch = "wasm32")]
impl WindowResizeListener {
	/// `None` when there is no window or the listener could not be added.
	pub fn attach(events: &ResizeEvents) -> Option<Self> {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::prelude::*;

		let window = web_sys::window()?;
		let events = events.clone();
		let source = window.clone();
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			if let Some(width) = window_width(&source) {
				events.emit(width);
			}
		}) as Box<dyn FnMut(web_sys::Event)>);

		window
			.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
			.ok()?;

		Some(Self { window, closure })
	}
}

#[cfg(target_arch = "wasm32")]
impl Drop for WindowResizeListener {
	fn drop(&mut self) {
		use wasm_bindgen::JsCast;

		let _ = self.window.remove_event_listener_with_callback(
			"resize",
			self.closure.as_ref().unchecked_ref(),
		);
	}
}

/// Current `window.innerWidth` in whole pixels.
#[cfg(target_arch = "wasm32")]
pub fn window_width(window: &web_sys::Window) -> Option<u32> {
	let width = window.inner_width().ok()?.as_f64()?;
	(width >= 0.0).then_some(width as u32)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_every_subscriber_sees_the_event() {
		let events = ResizeEvents::new();
		let total = Rc::new(Cell::new(0u32));

		let a = total.clone();
		let _first = events.subscribe(move |w| a.set(a.get() + w));
		let b = total.clone();
		let _second = events.subscribe(move |w| b.set(b.get() + w));

		events.emit(10);
		assert_eq!(total.get(), 20);
		assert_eq!(events.subscriber_count(), 2);
	}

	#[rstest]
	fn test_drop_unsubscribes_only_that_callback() {
		let events = ResizeEvents::new();
		let hits = Rc::new(Cell::new(0));

		let a = hits.clone();
		let first = events.subscribe(move |_| a.set(a.get() + 1));
		let b = hits.clone();
		let _second = events.subscribe(move |_| b.set(b.get() + 10));

		drop(first);
		events.emit(1);
		assert_eq!(hits.get(), 10);
		assert_eq!(events.subscriber_count(), 1);
	}

	#[rstest]
	fn test_subscription_outliving_registry_is_harmless() {
		let events = ResizeEvents::new();
		let subscription = events.subscribe(|_| {});
		drop(events);
		drop(subscription);
	}

	#[rstest]
	fn test_subscribing_during_emit_applies_next_time() {
		let events = ResizeEvents::new();
		let hits = Rc::new(Cell::new(0));
		let late = Rc::new(RefCell::new(Vec::new()));

		let registry = events.clone();
		let counter = hits.clone();
		let holder = late.clone();
		let _outer = events.subscribe(move |_| {
			let counter = counter.clone();
			holder
				.borrow_mut()
				.push(registry.subscribe(move |_| counter.set(counter.get() + 1)));
		});

		events.emit(1);
		assert_eq!(hits.get(), 0);
		events.emit(2);
		assert_eq!(hits.get(), 1);
	}
}
