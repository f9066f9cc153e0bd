#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use svg_studio_core::{MemoryStore, StudioConfig, Studio, SvgInfo, SvgParser};

/// Accepts markup whose first tag is `<svg ...>` and reads its sizing
/// attributes; anything containing `<broken` fails to parse.
pub struct StubParser;

impl SvgParser for StubParser {
    fn inspect(&self, markup: &str) -> Option<SvgInfo> {
        if markup.contains("<broken") {
            return None;
        }
        let start = markup.find("<svg")?;
        let end = markup[start..].find('>')? + start;
        let tag = &markup[start..end];
        Some(SvgInfo {
            width: attribute(tag, "width"),
            height: attribute(tag, "height"),
            view_box: attribute(tag, "viewBox"),
        })
    }
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let end = tag[start..].find('"')? + start;
    Some(tag[start..end].to_string())
}

pub struct Harness {
    pub studio: Studio,
    pub session: MemoryStore,
    pub prefs: MemoryStore,
    pub ticks: Rc<Cell<u32>>,
}

pub fn harness() -> Harness {
    harness_with(MemoryStore::new(), MemoryStore::new())
}

pub fn harness_with(session: MemoryStore, prefs: MemoryStore) -> Harness {
    let ticks = Rc::new(Cell::new(0));
    let clock_ticks = ticks.clone();
    let studio = Studio::new(
        StudioConfig::default(),
        Rc::new(session.clone()),
        Rc::new(prefs.clone()),
        Rc::new(StubParser),
        Rc::new(move || {
            clock_ticks.set(clock_ticks.get() + 1);
            format!("t{}", clock_ticks.get())
        }),
    );
    Harness {
        studio,
        session,
        prefs,
        ticks,
    }
}
