//! Content frame loading, fade-in and hosted-document adjustment.

mod adjust;
mod document;
mod target;

use std::time::Duration;

use url::Url;

pub use adjust::{
    AdjustReport, EMBEDDED_ROOT_CLASS, MAIN_SELECTORS, NAVIGATION_SELECTORS,
    TOGGLE_SELECTORS, adjust_document,
};
pub use document::{Element, HostedDocument, InMemoryDocument, NodeId, Selector};
pub use target::{EMBEDDED_PARAM, embedded_url};

use crate::error::ContentAccessError;

/// Delay between the load signal and the start of the fade-in.
pub const FADE_IN_DELAY: Duration = Duration::from_millis(10);
/// Duration of the opacity transition.
pub const FADE_DURATION: Duration = Duration::from_millis(240);
/// Offsets after the load signal at which the adjustment pass runs.
pub const ADJUST_DELAYS: [Duration; 3] = [
    Duration::ZERO,
    Duration::from_millis(350),
    Duration::from_millis(1200),
];

/// The surface displaying hosted pages.
pub trait FrameHost {
    /// Currently loaded URL, if any.
    fn source(&self) -> Option<&str>;
    fn navigate(&mut self, url: &str);
    fn set_opacity(&mut self, opacity: f32, transition: Option<Duration>);
    /// Hosted document, when the host grants access to it.
    fn document(
        &mut self,
    ) -> Result<&mut dyn HostedDocument, ContentAccessError>;
}

/// What a load request did to the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Navigated(String),
    Unchanged,
}

/// Resolves menu targets and drives a [`FrameHost`].
#[derive(Debug, Clone)]
pub struct FrameLoader {
    base: Url,
}

impl FrameLoader {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn resolve(&self, raw: &str) -> String {
        embedded_url(&self.base, raw)
    }

    /// Navigate to `raw` unless the frame already shows it.
    pub fn load<F: FrameHost + ?Sized>(
        &self,
        frame: &mut F,
        raw: &str,
    ) -> LoadOutcome {
        let url = self.resolve(raw);
        if frame.source() == Some(url.as_str()) {
            log::debug!("frame already shows {url}, reload skipped");
            return LoadOutcome::Unchanged;
        }

        frame.navigate(&url);
        LoadOutcome::Navigated(url)
    }

    /// Hide the frame right after a page finished loading.
    pub fn begin_fade<F: FrameHost + ?Sized>(frame: &mut F) {
        frame.set_opacity(0.0, None);
    }

    pub fn finish_fade<F: FrameHost + ?Sized>(frame: &mut F) {
        frame.set_opacity(1.0, Some(FADE_DURATION));
    }

    /// Run one adjustment pass if the hosted document is reachable.
    pub fn adjust<F: FrameHost + ?Sized>(
        frame: &mut F,
    ) -> Option<AdjustReport> {
        match frame.document() {
            Ok(doc) => Some(adjust_document(doc)),
            Err(err) => {
                log::debug!("adjustment skipped: {err}");
                None
            },
        }
    }
}

/// Frame host without a real surface. Pages are supplied by the caller.
#[derive(Debug, Clone)]
pub struct MemoryFrame {
    source: Option<String>,
    opacity: f32,
    transition: Option<Duration>,
    document: Option<InMemoryDocument>,
    cross_origin: bool,
    navigations: Vec<String>,
}

impl Default for MemoryFrame {
    fn default() -> Self {
        Self {
            source: None,
            opacity: 1.0,
            transition: None,
            document: None,
            cross_origin: false,
            navigations: Vec::new(),
        }
    }
}

impl MemoryFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hosted page. `cross_origin` denies document access.
    pub fn host(&mut self, document: InMemoryDocument, cross_origin: bool) {
        self.document = Some(document);
        self.cross_origin = cross_origin;
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn transition(&self) -> Option<Duration> {
        self.transition
    }

    pub fn hosted(&self) -> Option<&InMemoryDocument> {
        self.document.as_ref()
    }

    /// Every URL navigated to, oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }
}

impl FrameHost for MemoryFrame {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn navigate(&mut self, url: &str) {
        self.source = Some(url.to_string());
        self.navigations.push(url.to_string());
        self.document = None;
        self.cross_origin = false;
    }

    fn set_opacity(&mut self, opacity: f32, transition: Option<Duration>) {
        self.opacity = opacity;
        self.transition = transition;
    }

    fn document(
        &mut self,
    ) -> Result<&mut dyn HostedDocument, ContentAccessError> {
        if self.cross_origin {
            return Err(ContentAccessError::CrossOrigin);
        }
        match self.document.as_mut() {
            Some(doc) => Ok(doc),
            None => Err(ContentAccessError::NotLoaded),
        }
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::{
        Element, FADE_DURATION, FrameHost, FrameLoader, InMemoryDocument,
        LoadOutcome, MemoryFrame,
    };

    fn loader() -> FrameLoader {
        FrameLoader::new(
            Url::parse("https://panel.example/panel.html")
                .expect("base url should parse"),
        )
    }

    #[test]
    fn given_same_target_when_loaded_twice_then_second_load_is_skipped() {
        let loader = loader();
        let mut frame = MemoryFrame::new();

        let first = loader.load(&mut frame, "reports.html");
        let second = loader.load(&mut frame, "reports.html");

        assert_eq!(
            first,
            LoadOutcome::Navigated(String::from(
                "https://panel.example/reports.html?embedded=1"
            ))
        );
        assert_eq!(second, LoadOutcome::Unchanged);
        assert_eq!(frame.navigations().len(), 1);
    }

    #[test]
    fn given_different_target_when_loaded_then_frame_navigates() {
        let loader = loader();
        let mut frame = MemoryFrame::new();

        loader.load(&mut frame, "a.html");
        loader.load(&mut frame, "b.html");
        loader.load(&mut frame, "a.html");

        assert_eq!(frame.navigations().len(), 3);
        assert_eq!(
            frame.source(),
            Some("https://panel.example/a.html?embedded=1")
        );
    }

    #[test]
    fn given_loaded_frame_when_faded_then_opacity_returns_with_transition() {
        let mut frame = MemoryFrame::new();

        FrameLoader::begin_fade(&mut frame);
        assert_eq!(frame.opacity(), 0.0);

        FrameLoader::finish_fade(&mut frame);
        assert_eq!(frame.opacity(), 1.0);
        assert_eq!(frame.transition(), Some(FADE_DURATION));
    }

    #[test]
    fn given_cross_origin_page_when_adjusted_then_pass_is_skipped() {
        let mut frame = MemoryFrame::new();
        let page = InMemoryDocument::new().with(Element::new("aside"));
        frame.host(page.clone(), true);

        assert_eq!(FrameLoader::adjust(&mut frame), None);
        assert_eq!(frame.hosted(), Some(&page));
    }

    #[test]
    fn given_no_page_when_adjusted_then_pass_is_skipped() {
        let mut frame = MemoryFrame::new();

        assert_eq!(FrameLoader::adjust(&mut frame), None);
    }

    #[test]
    fn given_same_origin_page_when_adjusted_then_report_is_returned() {
        let mut frame = MemoryFrame::new();
        frame.host(InMemoryDocument::new().with(Element::new("aside")), false);

        let report = FrameLoader::adjust(&mut frame);

        assert_eq!(report.map(|report| report.hidden), Some(1));
    }
}
