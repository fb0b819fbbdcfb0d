//! End-to-end publish flow against a temporary vault and in-memory hosts.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quickshare_note::app::infrastructure::platform::Clipboard;
use quickshare_note::app::{
    AppError, AppSettings, Document, FsVault, ImageHost, PublishResult, Publisher, Result, SnippetHost,
    Vault,
};
use quickshare_note::ui::notices::Notifier;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create { name: String, content: String },
    Update { id: String, name: String, content: String },
}

#[derive(Default)]
struct FakeGists {
    calls: RefCell<Vec<Call>>,
    fail: bool,
}

impl SnippetHost for FakeGists {
    fn create(&self, file_name: &str, content: &str) -> Result<PublishResult> {
        if self.fail {
            return Err(AppError::from_status(401, "Bad credentials"));
        }
        self.calls.borrow_mut().push(Call::Create {
            name: file_name.to_string(),
            content: content.to_string(),
        });
        Ok(PublishResult {
            id: "new456".into(),
            url: "https://gist.github.com/octocat/new456".into(),
        })
    }

    fn update(&self, id: &str, file_name: &str, content: &str) -> Result<PublishResult> {
        if self.fail {
            return Err(AppError::Network("connection refused".into()));
        }
        self.calls.borrow_mut().push(Call::Update {
            id: id.to_string(),
            name: file_name.to_string(),
            content: content.to_string(),
        });
        Ok(PublishResult {
            id: id.to_string(),
            url: format!("https://gist.github.com/octocat/{}", id),
        })
    }
}

#[derive(Default)]
struct FakeImgur {
    uploads: RefCell<Vec<Vec<u8>>>,
}

impl ImageHost for FakeImgur {
    fn upload(&self, bytes: &[u8]) -> Result<String> {
        let mut uploads = self.uploads.borrow_mut();
        uploads.push(bytes.to_vec());
        Ok(format!("https://i.imgur.com/img{}.png", uploads.len()))
    }
}

#[derive(Default)]
struct FakeClipboard {
    copied: RefCell<Option<String>>,
    broken: bool,
}

impl Clipboard for FakeClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        if self.broken {
            return Err(AppError::Io(std::io::Error::other("no display")));
        }
        *self.copied.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    notices: RefCell<Vec<String>>,
    pending: RefCell<Option<String>>,
}

impl Notifier for RecordingNotifier {
    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn pending(&self, message: &str) {
        *self.pending.borrow_mut() = Some(message.to_string());
    }

    fn hide_pending(&self) {
        *self.pending.borrow_mut() = None;
    }
}

/// Reads through to disk but refuses every write.
struct ReadOnlyVault(FsVault);

impl Vault for ReadOnlyVault {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.0.read(path)
    }

    fn read_binary(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.0.read_binary(path)
    }

    fn write(&self, _path: &Path, _content: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only vault"))
    }

    fn resolve_link(&self, link: &str, source_dir: &Path) -> Option<PathBuf> {
        self.0.resolve_link(link, source_dir)
    }
}

struct Harness {
    dir: tempfile::TempDir,
    vault: FsVault,
    images: FakeImgur,
    gists: FakeGists,
    clipboard: FakeClipboard,
    notifier: RecordingNotifier,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let vault = FsVault::new(dir.path());
        Self {
            dir,
            vault,
            images: FakeImgur::default(),
            gists: FakeGists::default(),
            clipboard: FakeClipboard::default(),
            notifier: RecordingNotifier::default(),
        }
    }

    fn file(&self, rel: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn publisher(&self, show_frontmatter: bool) -> Publisher<'_> {
        let settings = AppSettings {
            show_frontmatter,
            ..Default::default()
        };
        Publisher::with_settings(
            &settings,
            &self.vault,
            &self.images,
            &self.gists,
            &self.clipboard,
            &self.notifier,
        )
    }

    fn calls(&self) -> Vec<Call> {
        self.gists.calls.borrow().clone()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn first_publish_creates_gist_and_records_url() {
    let h = Harness::new();
    let note = h.file("notes/Trip Plan.md", b"Day one\n");

    let report = h.publisher(true).publish(Some(&Document::new(&note))).unwrap();

    assert!(report.created);
    assert_eq!(report.url, "https://gist.github.com/octocat/new456");
    assert_eq!(
        h.calls(),
        vec![Call::Create {
            name: "Trip Plan.md".into(),
            content: "# Trip Plan\n\nDay one\n".into(),
        }]
    );
    assert_eq!(
        read(&note),
        "---\ngist-publish-url: https://gist.github.com/octocat/new456\n---\nDay one\n"
    );
    assert_eq!(
        h.clipboard.copied.borrow().as_deref(),
        Some("https://gist.github.com/octocat/new456")
    );
    assert_eq!(
        *h.notifier.notices.borrow(),
        vec!["Gist URL copied to clipboard", "Note published to GitHub gist"]
    );
    assert!(h.notifier.pending.borrow().is_none());
}

#[test]
fn second_publish_updates_recorded_gist() {
    let h = Harness::new();
    let note = h.file("note.md", b"First\n");
    let doc = Document::new(&note);

    h.publisher(true).publish(Some(&doc)).unwrap();
    fs::write(&note, read(&note).replace("First", "Second")).unwrap();
    let report = h.publisher(true).publish(Some(&doc)).unwrap();

    assert!(!report.created);
    assert_eq!(report.id, "new456");
    let calls = h.calls();
    assert_eq!(calls.len(), 2);
    match &calls[1] {
        Call::Update { id, name, content } => {
            assert_eq!(id, "new456");
            assert_eq!(name, "note.md");
            assert!(content.ends_with("# note\n\nSecond\n"));
        }
        other => panic!("expected update, got {:?}", other),
    }
    // URL line rewritten in place, not duplicated
    assert_eq!(read(&note).matches("gist-publish-url").count(), 1);
}

#[test]
fn hidden_frontmatter_is_not_published_but_stays_on_disk() {
    let h = Harness::new();
    let note = h.file(
        "note.md",
        b"---\ngist-publish-url: https://host/gists/abc123\n---\nBody text",
    );

    h.publisher(false).publish(Some(&Document::new(&note))).unwrap();

    assert_eq!(
        h.calls(),
        vec![Call::Update {
            id: "abc123".into(),
            name: "note.md".into(),
            content: "# note\n\nBody text".into(),
        }]
    );
    assert_eq!(
        read(&note),
        "---\ngist-publish-url: https://gist.github.com/octocat/abc123\n---\nBody text"
    );
}

#[test]
fn shown_frontmatter_is_published_before_heading() {
    let h = Harness::new();
    let note = h.file("note.md", b"---\ntags: travel\n---\nBody");

    h.publisher(true).publish(Some(&Document::new(&note))).unwrap();

    match &h.calls()[0] {
        Call::Create { content, .. } => assert_eq!(content, "---\ntags: travel\n---\n# note\n\nBody"),
        other => panic!("expected create, got {:?}", other),
    }
    assert_eq!(
        read(&note),
        "---\ntags: travel\ngist-publish-url: https://gist.github.com/octocat/new456\n---\nBody"
    );
}

#[test]
fn images_uploaded_in_published_copy_only() {
    let h = Harness::new();
    h.file("attachments/photo.png", b"\x89PNG");
    let note = h.file("notes/n.md", b"See ![[photo.png]] and ![[gone.png]]\n");

    let report = h.publisher(true).publish(Some(&Document::new(&note))).unwrap();

    assert_eq!(report.images_uploaded, 1);
    assert_eq!(report.images_skipped, 1);
    assert_eq!(*h.images.uploads.borrow(), vec![b"\x89PNG".to_vec()]);
    match &h.calls()[0] {
        Call::Create { content, .. } => assert_eq!(
            content,
            "# n\n\nSee ![Uploaded Image](https://i.imgur.com/img1.png) and ![[gone.png]]\n"
        ),
        other => panic!("expected create, got {:?}", other),
    }
    // the local note keeps its embeds
    assert!(read(&note).contains("![[photo.png]]"));
}

#[test]
fn no_active_document_aborts_without_side_effects() {
    let h = Harness::new();

    let err = h.publisher(true).publish(None).unwrap_err();

    assert!(matches!(err, AppError::NoActiveDocument));
    assert!(h.calls().is_empty());
    assert_eq!(*h.notifier.notices.borrow(), vec!["No active file found"]);
    assert!(h.clipboard.copied.borrow().is_none());
}

#[test]
fn publish_failure_leaves_note_untouched() {
    let mut h = Harness::new();
    h.gists.fail = true;
    let note = h.file("note.md", b"Body\n");

    let err = h.publisher(true).publish(Some(&Document::new(&note))).unwrap_err();

    assert!(matches!(err, AppError::Auth { status: 401 }));
    assert_eq!(read(&note), "Body\n");
    assert!(h.clipboard.copied.borrow().is_none());
    let notices = h.notifier.notices.borrow();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("Failed to publish note:"));
    assert!(h.notifier.pending.borrow().is_none());
}

#[test]
fn update_failure_leaves_note_untouched() {
    let mut h = Harness::new();
    h.gists.fail = true;
    let original = "---\ngist-publish-url: https://gist.github.com/octocat/abc123\n---\nBody\n";
    let note = h.file("note.md", original.as_bytes());

    let err = h.publisher(true).publish(Some(&Document::new(&note))).unwrap_err();

    assert!(matches!(err, AppError::Network(_)));
    assert_eq!(read(&note), original);
    assert!(h.clipboard.copied.borrow().is_none());
    let notices = h.notifier.notices.borrow();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("Failed to publish note:"));
}

#[test]
fn failed_local_write_after_remote_publish_aborts() {
    let h = Harness::new();
    let note = h.file("note.md", b"Body\n");
    let vault = ReadOnlyVault(FsVault::new(h.dir.path()));
    let publisher = Publisher {
        vault: &vault,
        images: &h.images,
        snippets: &h.gists,
        clipboard: &h.clipboard,
        notifier: &h.notifier,
        show_frontmatter: true,
    };

    let err = publisher.publish(Some(&Document::new(&note))).unwrap_err();

    // the gist exists remotely even though the note could not record it
    assert_eq!(
        h.calls(),
        vec![Call::Create {
            name: "note.md".into(),
            content: "# note\n\nBody\n".into(),
        }]
    );
    assert!(matches!(err, AppError::Io(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
    assert_eq!(read(&note), "Body\n");
    assert!(h.clipboard.copied.borrow().is_none());
    let notices = h.notifier.notices.borrow();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("Failed to publish note:"));
    assert!(h.notifier.pending.borrow().is_none());
}

#[test]
fn clipboard_failure_does_not_abort() {
    let mut h = Harness::new();
    h.clipboard.broken = true;
    let note = h.file("note.md", b"Body\n");

    let report = h.publisher(true).publish(Some(&Document::new(&note))).unwrap();

    assert!(read(&note).contains(&report.url));
    assert_eq!(
        *h.notifier.notices.borrow(),
        vec!["Failed to copy gist URL to clipboard", "Note published to GitHub gist"]
    );
}

#[test]
fn preview_changes_nothing() {
    let h = Harness::new();
    let note = h.file("draft.md", b"---\na: 1\n---\n![[x.png]]\n");

    let text = h.publisher(false).preview(Some(&Document::new(&note))).unwrap();

    assert_eq!(text, "# draft\n\n![[x.png]]\n");
    assert!(h.calls().is_empty());
    assert!(h.images.uploads.borrow().is_empty());
    assert_eq!(read(&note), "---\na: 1\n---\n![[x.png]]\n");
}
