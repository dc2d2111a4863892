use std::fs;
use std::time::{Duration, Instant};

use iced::animation::Animation;
use panel_shell::ContentAccessError;
use panel_shell::frame::{
    Element, FrameHost, HostedDocument, InMemoryDocument, MemoryFrame, NodeId,
};
use scraper::{ElementRef, Html, Node, Selector as CssSelector};
use url::Url;

use crate::errors::PageError;

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// How a page request ended.
#[derive(Debug, Clone)]
pub(crate) enum PageOutcome {
    Hosted(InMemoryDocument),
    CrossOrigin,
    Failed(String),
}

/// A page read for the content frame.
#[derive(Debug, Clone)]
pub(crate) struct LoadedPage {
    pub(crate) url: String,
    pub(crate) title: Option<String>,
    pub(crate) outcome: PageOutcome,
}

/// Content frame of the desktop window.
///
/// Navigation only records the request; the page itself is read off the UI
/// thread and handed back through [`DesktopFrame::accept`].
#[derive(Debug)]
pub(crate) struct DesktopFrame {
    origin: Url,
    inner: MemoryFrame,
    pending: Option<String>,
    title: Option<String>,
    failure: Option<String>,
    cross_origin: bool,
    fade: Animation<f32>,
}

impl DesktopFrame {
    pub(crate) fn new(origin: Url) -> Self {
        Self {
            origin,
            inner: MemoryFrame::new(),
            pending: None,
            title: None,
            failure: None,
            cross_origin: false,
            fade: Animation::new(1.0),
        }
    }

    pub(crate) fn origin(&self) -> &Url {
        &self.origin
    }

    /// URL navigated to since the last call, if any.
    pub(crate) fn take_pending(&mut self) -> Option<String> {
        self.pending.take()
    }

    /// Install a loaded page. Pages for a stale source are dropped.
    pub(crate) fn accept(&mut self, page: LoadedPage) -> bool {
        if self.inner.source() != Some(page.url.as_str()) {
            log::debug!("dropping stale page {}", page.url);
            return false;
        }

        self.title = page.title;
        self.failure = None;
        self.cross_origin = false;
        match page.outcome {
            PageOutcome::Hosted(doc) => self.inner.host(doc, false),
            PageOutcome::CrossOrigin => {
                self.cross_origin = true;
                self.inner.host(InMemoryDocument::new(), true);
            },
            PageOutcome::Failed(message) => self.failure = Some(message),
        }
        true
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Rendered opacity at `at`, partway through a running transition.
    pub(crate) fn opacity_at(&self, at: Instant) -> f32 {
        self.fade.interpolate_with(|opacity| opacity, at)
    }

    pub(crate) fn is_fading(&self, at: Instant) -> bool {
        self.fade.is_animating(at)
    }

    fn fade_to(
        &mut self,
        opacity: f32,
        transition: Option<Duration>,
        at: Instant,
    ) {
        self.fade = match transition {
            Some(duration) => Animation::new(self.opacity_at(at))
                .duration(duration)
                .go(opacity, at),
            None => Animation::new(opacity),
        };
    }

    pub(crate) fn hosted(&self) -> Option<&InMemoryDocument> {
        self.inner.hosted()
    }

    pub(crate) fn is_cross_origin(&self) -> bool {
        self.cross_origin
    }
}

impl FrameHost for DesktopFrame {
    fn source(&self) -> Option<&str> {
        self.inner.source()
    }

    fn navigate(&mut self, url: &str) {
        self.inner.navigate(url);
        self.pending = Some(url.to_string());
        self.title = None;
        self.failure = None;
        self.cross_origin = false;
    }

    fn set_opacity(&mut self, opacity: f32, transition: Option<Duration>) {
        self.inner.set_opacity(opacity, transition);
        self.fade_to(opacity, transition, Instant::now());
    }

    fn document(
        &mut self,
    ) -> Result<&mut dyn HostedDocument, ContentAccessError> {
        self.inner.document()
    }
}

/// Read `url` for a frame hosted by a shell served from `origin`.
pub(crate) fn load_page(origin: &Url, url: &str) -> LoadedPage {
    let page = |title, outcome| LoadedPage {
        url: url.to_string(),
        title,
        outcome,
    };

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => return page(None, PageOutcome::Failed(format!("{err}"))),
    };
    if !same_origin(origin, &parsed) {
        return page(None, PageOutcome::CrossOrigin);
    }

    match read_page(&parsed) {
        Ok(source) => {
            let (title, doc) = parse_page(&source);
            page(title, PageOutcome::Hosted(doc))
        },
        Err(err) => {
            log::warn!("failed to load {url}: {err}");
            page(None, PageOutcome::Failed(format!("{err}")))
        },
    }
}

pub(crate) fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

fn read_page(url: &Url) -> Result<String, PageError> {
    let not_local = || PageError::NotLocal {
        url: url.to_string(),
    };
    if url.scheme() != "file" {
        return Err(not_local());
    }
    let path = url.to_file_path().map_err(|()| not_local())?;
    Ok(fs::read_to_string(path)?)
}

/// Build the hosted document for an HTML page.
pub(crate) fn parse_page(source: &str) -> (Option<String>, InMemoryDocument) {
    let html = Html::parse_document(source);

    let title = CssSelector::parse("title")
        .ok()
        .and_then(|selector| html.select(&selector).next())
        .map(|node| normalize_whitespace(&node.text().collect::<String>()))
        .filter(|title| !title.is_empty());

    let mut doc = InMemoryDocument::new();
    let Ok(selector) = CssSelector::parse("body") else {
        return (title, doc);
    };
    if let Some(body) = html.select(&selector).next() {
        for child in body.children().filter_map(ElementRef::wrap) {
            push_subtree(&mut doc, child, None);
        }
    }

    (title, doc)
}

/// Copy `node` and its element descendants in document order.
fn push_subtree(
    doc: &mut InMemoryDocument,
    node: ElementRef<'_>,
    parent: Option<NodeId>,
) {
    if SKIPPED_TAGS.contains(&node.value().name()) {
        return;
    }

    let element = element_from(&node);
    let id = match parent {
        Some(parent) => doc.push_child(parent, element),
        None => doc.push(element),
    };
    for child in node.children().filter_map(ElementRef::wrap) {
        push_subtree(doc, child, Some(id));
    }
}

fn element_from(node: &ElementRef<'_>) -> Element {
    let value = node.value();
    let mut element = Element::new(value.name());
    if let Some(id) = value.id() {
        element = element.with_id(id);
    }
    for class in value.classes() {
        element = element.with_class(class);
    }
    for (property, style) in inline_styles(value.attr("style").unwrap_or("")) {
        element = element.with_style(&property, &style);
    }

    let own_text: String = node
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ");
    let own_text = normalize_whitespace(&own_text);
    if !own_text.is_empty() {
        element = element.with_text(&own_text);
    }

    element
}

fn inline_styles(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(property, value)| {
            (property.trim().to_ascii_lowercase(), value.trim().to_string())
        })
        .filter(|(property, _)| !property.is_empty())
        .collect()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use panel_shell::frame::{
        EMBEDDED_ROOT_CLASS, FADE_DURATION, FrameHost, FrameLoader,
        HostedDocument, NodeId, Selector,
    };
    use url::Url;

    use super::{
        DesktopFrame, LoadedPage, PageOutcome, load_page, parse_page,
        same_origin,
    };

    const PAGE: &str = r#"<!doctype html>
<html>
  <head><title> Fiyat   Tablosu </title><style>.x{}</style></head>
  <body>
    <aside id="sidebar" class="sidebar">Menü</aside>
    <button class="menu-toggle">☰</button>
    <div class="main" style="padding-left: 32px; color: red">
      <h1>Fiyatlar</h1>
    </div>
    <script>console.log("x")</script>
  </body>
</html>"#;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("test url should parse")
    }

    #[test]
    fn given_html_when_parsed_then_body_elements_and_title_are_kept() {
        let (title, doc) = parse_page(PAGE);

        assert_eq!(title.as_deref(), Some("Fiyat Tablosu"));
        let tags: Vec<&str> =
            doc.elements().iter().map(|element| element.tag()).collect();
        assert_eq!(tags, vec!["aside", "button", "div", "h1"]);
        assert_eq!(doc.elements()[0].text(), Some("Menü"));
        assert_eq!(doc.elements()[2].style("padding-left"), Some("32px"));
    }

    #[test]
    fn given_parsed_page_when_adjusted_then_chrome_hides_and_padding_stays() {
        let (_, mut doc) = parse_page(PAGE);

        panel_shell::frame::adjust_document(&mut doc);

        assert_eq!(doc.style(NodeId(0), "display").as_deref(), Some("none"));
        assert_eq!(doc.style(NodeId(1), "display").as_deref(), Some("none"));
        let main = doc.select(&Selector::parse(".main"));
        assert_eq!(
            doc.style(main[0], "padding-left").as_deref(),
            Some("32px")
        );
        assert!(doc.has_root_class(EMBEDDED_ROOT_CLASS));
    }

    #[test]
    fn given_nested_navigation_when_adjusted_then_its_text_is_not_visible() {
        let (_, mut doc) = parse_page(
            "<aside id=\"sidebar\"><ul><li>Ana Sayfa</li><li>Ayarlar</li>\
             </ul></aside><div class=\"main\"><p>Fiyatlar</p></div>",
        );

        panel_shell::frame::adjust_document(&mut doc);

        let visible: Vec<&str> = doc
            .visible_elements()
            .filter_map(|element| element.text())
            .collect();
        assert_eq!(visible, vec!["Fiyatlar"]);
        assert_eq!(doc.parent(NodeId(2)), Some(NodeId(1)));
    }

    #[test]
    fn given_urls_when_compared_then_scheme_host_and_port_decide_origin() {
        let shell = url("https://panel.example/app/panel.html");

        assert!(same_origin(&shell, &url("https://panel.example:443/x")));
        assert!(!same_origin(&shell, &url("http://panel.example/x")));
        assert!(!same_origin(&shell, &url("https://other.example/x")));
        assert!(same_origin(
            &url("file:///opt/panel/panel.html"),
            &url("file:///opt/panel/reports.html")
        ));
    }

    #[test]
    fn given_other_origin_when_loaded_then_page_is_cross_origin() {
        let page = load_page(
            &url("file:///opt/panel/panel.html"),
            "https://other.example/reports.html?embedded=1",
        );

        assert!(matches!(page.outcome, PageOutcome::CrossOrigin));
    }

    #[test]
    fn given_local_page_when_loaded_through_frame_then_document_is_reachable()
    {
        let root = test_temp_dir("local_page");
        fs::write(root.join("reports.html"), PAGE)
            .expect("page should be written");
        let shell = Url::from_file_path(root.join("panel.html"))
            .expect("temp dir should be absolute");
        let loader = FrameLoader::new(shell.clone());
        let mut frame = DesktopFrame::new(shell.clone());

        loader.load(&mut frame, "reports.html");
        let pending = frame.take_pending().expect("navigation is pending");
        let page = load_page(frame.origin(), &pending);

        assert!(frame.accept(page));
        assert_eq!(frame.title(), Some("Fiyat Tablosu"));
        assert!(FrameLoader::adjust(&mut frame).is_some());
        assert!(!frame.is_cross_origin());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_missing_local_page_when_loaded_then_failure_is_reported() {
        let root = test_temp_dir("missing_page");
        let shell = Url::from_file_path(root.join("panel.html"))
            .expect("temp dir should be absolute");
        let target = Url::from_file_path(root.join("nope.html"))
            .expect("temp dir should be absolute");

        let page = load_page(&shell, target.as_str());

        assert!(matches!(page.outcome, PageOutcome::Failed(_)));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_fade_in_when_sampled_then_opacity_rises_over_the_transition() {
        let mut frame = DesktopFrame::new(url("https://panel.example/"));
        let start = Instant::now();

        frame.fade_to(0.0, None, start);
        assert_eq!(frame.opacity_at(start), 0.0);

        frame.fade_to(1.0, Some(FADE_DURATION), start);
        let midway = frame.opacity_at(start + FADE_DURATION / 2);

        assert!(frame.is_fading(start + FADE_DURATION / 2));
        assert!(midway > 0.0 && midway < 1.0, "midway opacity {midway}");
        let done = start + FADE_DURATION + Duration::from_millis(1);
        assert!(!frame.is_fading(done));
        assert_eq!(frame.opacity_at(done), 1.0);
    }

    #[test]
    fn given_stale_page_when_accepted_then_it_is_dropped() {
        let shell = url("https://panel.example/panel.html");
        let mut frame = DesktopFrame::new(shell);
        frame.navigate("https://panel.example/b.html?embedded=1");

        let accepted = frame.accept(LoadedPage {
            url: String::from("https://panel.example/a.html?embedded=1"),
            title: Some(String::from("A")),
            outcome: PageOutcome::CrossOrigin,
        });

        assert!(!accepted);
        assert_eq!(frame.title(), None);
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "panel-frame-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
