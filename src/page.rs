use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use web_sys::{Document, Window};

use crate::analytics::{BrowserReporter, NoopReporter, Reporter};
use crate::config::SiteConfig;
use crate::session::PageSession;

/// Everything a widget needs to attach, built once per page view.
#[derive(Clone)]
pub struct PageContext {
    pub window: Window,
    pub document: Document,
    pub config: Rc<SiteConfig>,
    pub analytics: Rc<dyn Reporter>,
    pub session: Rc<RefCell<PageSession>>,
}

impl PageContext {
    pub fn new(window: Window, document: Document) -> Self {
        let config = SiteConfig::load(&document);
        let analytics: Rc<dyn Reporter> = if config.analytics_enabled {
            Rc::new(BrowserReporter::new(window.clone()))
        } else {
            Rc::new(NoopReporter)
        };
        Self {
            window,
            document,
            config: Rc::new(config),
            analytics,
            session: Rc::new(RefCell::new(PageSession::new(Utc::now()))),
        }
    }

    pub fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    pub fn href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}
