use std::cell::{Cell, RefCell};
use std::rc::Rc;

use svg_studio_core::{Studio, StudioConfig};

use crate::browser_io::locale_timestamp;
use crate::browser_store::{StorageArea, WebStore};
use crate::svg_dom::DomSvgParser;

pub(crate) type StudioSubscriber = Rc<dyn Fn()>;

/// Page-lifetime owner of the `Studio`. Components read through `with` and
/// write through `update`; every update bumps the revision and notifies
/// subscribers so the view re-renders.
pub(crate) struct StudioCore {
    studio: RefCell<Studio>,
    revision: Cell<u64>,
    subscribers: Rc<RefCell<Vec<StudioSubscriber>>>,
}

impl StudioCore {
    pub(crate) fn new(config: StudioConfig) -> Rc<Self> {
        let studio = Studio::new(
            config,
            Rc::new(WebStore::new(StorageArea::Session)),
            Rc::new(WebStore::new(StorageArea::Local)),
            Rc::new(DomSvgParser),
            Rc::new(locale_timestamp),
        );
        Self::with_studio(studio)
    }

    pub(crate) fn with_studio(studio: Studio) -> Rc<Self> {
        Rc::new(Self {
            studio: RefCell::new(studio),
            revision: Cell::new(0),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: StudioSubscriber) -> StudioSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        StudioSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub(crate) fn config(&self) -> StudioConfig {
        self.studio.borrow().config().clone()
    }

    pub(crate) fn with<R>(&self, read: impl FnOnce(&Studio) -> R) -> R {
        read(&self.studio.borrow())
    }

    pub(crate) fn update<R>(&self, write: impl FnOnce(&mut Studio) -> R) -> R {
        let result = write(&mut self.studio.borrow_mut());
        self.revision.set(self.revision.get().wrapping_add(1));
        self.notify();
        result
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub(crate) struct StudioSubscription {
    subscriber: StudioSubscriber,
    subscribers: Rc<RefCell<Vec<StudioSubscriber>>>,
}

impl Drop for StudioSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
