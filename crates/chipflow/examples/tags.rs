//! Tag cloud demo.
//!
//! Builds the same tags into four chip views (defaults, custom settings,
//! a close-button template with removal on click, and per-tag overrides
//! through an adapter) and prints what a painter would draw.
//!
//! Run with: cargo run -p chipflow --example tags

use chipflow::{
    Chip, ChipAdapter, ChipData, ChipNode, ChipView, ChipViewConfig, Color, ContentMargins,
    LayoutId, NodeTemplate, Point, ResourceTable,
};

const CHIP_CLOSE: LayoutId = LayoutId(1);
const CHIP_DOUBLE_CLOSE: LayoutId = LayoutId(2);

const BLUE: Color = Color::from_rgb(0x21 as f32 / 255.0, 0x96 as f32 / 255.0, 0xF3 as f32 / 255.0);
const PURPLE: Color = Color::from_rgb(0x9C as f32 / 255.0, 0x27 as f32 / 255.0, 0xB0 as f32 / 255.0);
const TEAL: Color = Color::from_rgb(0.0, 0x96 as f32 / 255.0, 0x88 as f32 / 255.0);

/// A tag with a category that drives its look.
#[derive(Debug)]
struct Tag {
    name: String,
    kind: u8,
}

impl Tag {
    fn new(name: &str, kind: u8) -> Chip {
        Chip::new(Self {
            name: name.to_owned(),
            kind,
        })
    }
}

impl ChipData for Tag {
    fn text(&self) -> &str {
        &self.name
    }
}

fn kind(chip: &Chip) -> u8 {
    chip.downcast_ref::<Tag>().map_or(0, |tag| tag.kind)
}

/// Picks a template and colors from the tag category.
struct TagAdapter;

impl ChipAdapter for TagAdapter {
    fn layout_id(&self, _position: usize, chip: &Chip) -> Option<LayoutId> {
        match kind(chip) {
            1 | 5 => Some(CHIP_DOUBLE_CLOSE),
            3 => Some(CHIP_CLOSE),
            _ => None,
        }
    }

    fn background_color(&self, _position: usize, chip: &Chip) -> Option<Color> {
        match kind(chip) {
            1 | 4 => Some(BLUE),
            2 | 5 => Some(PURPLE),
            3 => Some(TEAL),
            _ => None,
        }
    }

    fn on_node_ready(&self, node: &mut ChipNode, _position: usize, chip: &Chip) {
        if kind(chip) == 2 {
            node.text_color = Some(BLUE);
        }
    }
}

fn resources() -> ResourceTable {
    let close = NodeTemplate::new()
        .with_padding(ContentMargins::new(12.0, 6.0, 8.0, 6.0))
        .with_trailing(16.0, 6.0);
    let double_close = close.clone().with_trailing(38.0, 6.0);

    ResourceTable::new()
        .with_template(CHIP_CLOSE, close)
        .with_template(CHIP_DOUBLE_CLOSE, double_close)
}

fn print_view(title: &str, view: &ChipView) {
    let size = view.layout(240.0);
    println!("{title}: {} chips, {} lines, {}x{}", view.count(), view.line_count(), size.width, size.height);
    for item in view.display_list() {
        let label = item.text.as_ref().map_or("", |t| t.text.as_str());
        let fill = item
            .fill_color()
            .map_or_else(|| "-".to_owned(), |c| c.to_hex());
        println!(
            "  {label:<16} at ({:>5.1}, {:>5.1}) {:>5.1}x{:<5.1} fill {fill}",
            item.bounds.left(),
            item.bounds.top(),
            item.bounds.width(),
            item.bounds.height(),
        );
    }
}

fn main() -> chipflow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chipflow=debug".into()),
        )
        .init();

    let plain = || {
        ["Lorem", "Ipsum dolor", "Sit amet", "Consectetur", "adipiscing elit"]
            .map(|name| Tag::new(name, 0))
    };

    let default_view = ChipView::new();
    default_view.set_chip_list(plain())?;
    print_view("default", &default_view);

    let custom_view = ChipView::builder()
        .config(ChipViewConfig {
            chip_spacing: 4.0,
            line_spacing: 4.0,
            chip_side_padding: 10.0,
            chip_corner_radius: 4.0,
            chip_text_size: Some(12.0),
            ..ChipViewConfig::default()
        })
        .build()?;
    custom_view.set_chip_list(plain())?;
    print_view("custom", &custom_view);

    let close_view = ChipView::builder()
        .resources(resources())
        .adapter(TagAdapter)
        .config(ChipViewConfig {
            default_layout: Some(CHIP_CLOSE),
            background_color: Color::from_rgb8(0x8B, 0xC3, 0x4A),
            background_color_selected: Color::from_rgb8(0x4C, 0xAF, 0x50),
            ..ChipViewConfig::default()
        })
        .build()?;
    close_view.set_chip_list(plain())?;
    let weak = close_view.downgrade();
    close_view.set_on_chip_click_listener(move |chip| {
        let Some(view) = weak.upgrade() else {
            return;
        };
        if let Err(err) = view.remove(chip) {
            tracing::warn!(error = %err, "could not remove tag");
        }
    });
    print_view("close", &close_view);

    // Tap the first chip: it is removed and the rest reflow.
    let first = Point::new(1.0, 1.0);
    if close_view.press_at(first) {
        if let Some(chip) = close_view.release_at(first) {
            println!("removed {:?}", chip.text());
        }
    }
    print_view("close after tap", &close_view);

    let override_view = ChipView::builder()
        .resources(resources())
        .adapter(TagAdapter)
        .build()?;
    override_view.set_chip_list(
        [
            ("Lorem", 1),
            ("Ipsum dolor", 2),
            ("Sit amet", 3),
            ("Consectetur", 4),
            ("adipiscing elit", 5),
        ]
        .map(|(name, kind)| Tag::new(name, kind)),
    )?;
    print_view("override", &override_view);

    Ok(())
}
