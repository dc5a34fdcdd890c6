mod support;

use ep_profile_core::source::MediaSize;
use ep_profile_core::types::{AssetRecord, Creator, CreatorUser, MediaKind, TextRecords, WalletEntry};
use ep_profile_core::{
    MediaReady, ModalError, ProfileConfig, ProfilePage, TemplateSlot, VideoBox, load_modal_media,
};
use support::{FakeProbe, FakeSource, FakeSurface, JsonTemplates, RecordingView, SurfaceEvent, entries};

fn assets() -> Vec<AssetRecord> {
    vec![
        AssetRecord {
            name: Some("Still".into()),
            image_url: Some("https://cdn.example/still.png".into()),
            image_original_url: Some("https://cdn.example/still-original.png".into()),
            creator: Some(Creator {
                user: Some(CreatorUser {
                    username: Some("carol".into()),
                }),
                profile_img_url: Some("https://cdn.example/carol.png".into()),
            }),
            ..Default::default()
        },
        AssetRecord {
            token_id: Some("12".into()),
            animation_url: Some("https://cdn.example/loop.mp4".into()),
            image_url: Some("https://cdn.example/loop-poster.png".into()),
            ..Default::default()
        },
    ]
}

async fn loaded_page(probe: FakeProbe) -> ProfilePage<FakeSource, FakeProbe> {
    let records = TextRecords::new().with_wallets(vec![WalletEntry {
        name: "ethereum".into(),
        value: Some("0xABC".into()),
    }]);
    let source = FakeSource::new(Some(records), Some(assets()));
    let mut page = ProfilePage::new("alice.eth", false, ProfileConfig::default(), source, probe);
    page.load(&RecordingView::default(), &JsonTemplates)
        .await
        .expect("load succeeds");
    page
}

#[tokio::test]
async fn image_modal_renders_creator_and_clears_loading() {
    let probe = FakeProbe::default().with("https://cdn.example/still-original.png", MediaSize::new(600, 600));
    let mut page = loaded_page(probe).await;
    let surface = FakeSurface::new(1024.0);

    let plan = page.open_modal(0, &JsonTemplates, &surface).unwrap();
    assert_eq!(plan.kind, MediaKind::Image);
    assert_eq!(plan.image_url, "https://cdn.example/still-original.png");
    assert!(page.modal().is_open());

    let SurfaceEvent::Show(markup) = &surface.events()[0] else {
        panic!("modal shown first");
    };
    let modal = &entries(markup, TemplateSlot::NftModal)[0];
    assert_eq!(modal["creator_username"], "carol");
    assert_eq!(modal["creator_avatar"], "https://cdn.example/carol.png");
    assert!(modal["image_preview_url"].is_null());

    let ready = load_modal_media(&plan, &surface, page.probe(), page.sink()).await;
    assert_eq!(ready, MediaReady::Image { decoded: true });
    assert!(page.modal().apply_media(plan.ticket, &ready, &surface));
    assert_eq!(surface.events().last(), Some(&SurfaceEvent::ClearLoading));
}

#[tokio::test]
async fn failed_image_decode_is_silent() {
    let mut page = loaded_page(FakeProbe::default()).await;
    let surface = FakeSurface::new(1024.0);

    let plan = page.open_modal(0, &JsonTemplates, &surface).unwrap();
    let ready = load_modal_media(&plan, &surface, page.probe(), page.sink()).await;

    assert_eq!(ready, MediaReady::Image { decoded: false });
    assert!(page.modal().apply_media(plan.ticket, &ready, &surface));
    assert_eq!(surface.events().len(), 1);
}

#[tokio::test]
async fn video_with_metadata_sizes_from_the_video() {
    let mut page = loaded_page(FakeProbe::default()).await;
    let surface = FakeSurface::new(400.0);
    surface.metadata.set(Some(MediaSize::new(480, 360)));

    let plan = page.open_modal(1, &JsonTemplates, &surface).unwrap();
    assert_eq!(plan.kind, MediaKind::Video);
    assert_eq!(plan.preview_url.as_deref(), Some("https://cdn.example/loop-poster.png"));

    let ready = load_modal_media(&plan, &surface, page.probe(), page.sink()).await;
    page.modal().apply_media(plan.ticket, &ready, &surface);

    assert_eq!(
        surface.events().last(),
        Some(&SurfaceEvent::Box(VideoBox::WidthLocked { height_px: 255 }))
    );
    assert!(page.probe().decoded().iter().all(|url| !url.contains("loop-poster")));
}

#[tokio::test]
async fn video_without_height_falls_back_to_preview() {
    let probe = FakeProbe::default().with("https://cdn.example/loop-poster.png", MediaSize::new(400, 200));
    let mut page = loaded_page(probe).await;
    let surface = FakeSurface::new(300.0);
    surface.metadata.set(Some(MediaSize::new(0, 0)));

    let plan = page.open_modal(1, &JsonTemplates, &surface).unwrap();
    let ready = load_modal_media(&plan, &surface, page.probe(), page.sink()).await;
    page.modal().apply_media(plan.ticket, &ready, &surface);

    let events = surface.events();
    assert!(events.contains(&SurfaceEvent::Poster("https://cdn.example/loop-poster.png".to_owned())));
    assert_eq!(
        events.last(),
        Some(&SurfaceEvent::Box(VideoBox::AspectBox {
            padding_bottom_pct: 50.0
        }))
    );
}

#[tokio::test]
async fn video_preview_failure_leaves_layout_unset() {
    let mut page = loaded_page(FakeProbe::default()).await;
    let surface = FakeSurface::new(300.0);

    let plan = page.open_modal(1, &JsonTemplates, &surface).unwrap();
    let ready = load_modal_media(&plan, &surface, page.probe(), page.sink()).await;

    assert_eq!(
        ready,
        MediaReady::Video {
            dimensions: None,
            poster: None
        }
    );
    page.modal().apply_media(plan.ticket, &ready, &surface);
    assert_eq!(surface.events().last(), Some(&SurfaceEvent::Box(VideoBox::Unset)));
}

#[tokio::test]
async fn stale_media_result_is_dropped() {
    let probe = FakeProbe::default().with("https://cdn.example/still-original.png", MediaSize::new(600, 600));
    let mut page = loaded_page(probe).await;
    let surface = FakeSurface::new(1024.0);

    let first = page.open_modal(0, &JsonTemplates, &surface).unwrap();
    let second = page.open_modal(1, &JsonTemplates, &surface).unwrap();
    assert_ne!(first.ticket, second.ticket);

    let ready = load_modal_media(&first, &surface, page.probe(), page.sink()).await;
    let before = surface.events().len();
    assert!(!page.modal().apply_media(first.ticket, &ready, &surface));
    assert_eq!(surface.events().len(), before);
}

#[tokio::test]
async fn close_pauses_then_hides_once() {
    let mut page = loaded_page(FakeProbe::default()).await;
    let surface = FakeSurface::new(1024.0);

    let plan = page.open_modal(1, &JsonTemplates, &surface).unwrap();
    assert!(page.close_modal(&surface));
    assert!(!page.modal().is_current(plan.ticket));

    let events = surface.events();
    assert_eq!(&events[1..], &[SurfaceEvent::Pause, SurfaceEvent::Hide]);

    assert!(!page.close_modal(&surface));
    assert_eq!(surface.events().len(), events.len());
}

#[tokio::test]
async fn unknown_index_keeps_modal_closed() {
    let mut page = loaded_page(FakeProbe::default()).await;
    let surface = FakeSurface::new(1024.0);

    let err = page.open_modal(7, &JsonTemplates, &surface).unwrap_err();

    assert!(matches!(err, ModalError::UnknownAsset(7)));
    assert!(!page.modal().is_open());
    assert!(surface.events().is_empty());
}
