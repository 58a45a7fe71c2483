//! Turning resolved chips into nodes.
//!
//! The built-in pill is a padded label with the chip spacing as right margin
//! and the line spacing as bottom margin. Host templates keep their declared
//! margins except on a zero right or bottom side, which falls back to the
//! same spacing.

use crate::chip::Chip;
use crate::config::ChipViewConfig;
use crate::error::Result;
use crate::layout::ContentMargins;
use crate::node::ChipNode;
use crate::resolver::{self, LayoutChoice, ResolveContext, ResolvedVisual};
use crate::resources::{ResourceProvider, require_template};

/// Build the node for `chip` from an already resolved visual.
pub fn materialize(
    chip: &Chip,
    position: usize,
    resolved: ResolvedVisual,
    config: &ChipViewConfig,
    resources: &dyn ResourceProvider,
) -> Result<ChipNode> {
    let mut node = ChipNode::new(chip.clone(), position, resolved.layout);

    match resolved.layout {
        LayoutChoice::BuiltIn => {
            node.padding = ContentMargins::symmetric(config.chip_side_padding, config.chip_padding);
            node.margins = ContentMargins::new(0.0, 0.0, config.chip_spacing, config.line_spacing);
            node.text = Some(chip.text().to_owned());
            node.font_size = config.chip_text_size;
        }
        LayoutChoice::Template(id) => {
            let template = require_template(resources, id)?;
            let declared = template.margins;
            node.margins = ContentMargins::new(
                declared.left,
                declared.top,
                if declared.right > 0.0 {
                    declared.right
                } else {
                    config.chip_spacing
                },
                if declared.bottom > 0.0 {
                    declared.bottom
                } else {
                    config.line_spacing
                },
            );
            node.padding = template.padding;
            if template.has_text_slot {
                node.text = Some(chip.text().to_owned());
                node.font_size = config.chip_text_size.or(template.text_size);
                node.text_color = template.text_color;
            }
            node.background_insets = template.content_slot.unwrap_or(ContentMargins::ZERO);
            node.min_size = template.min_size;
            node.trailing_width = template.trailing_width;
            node.trailing_spacing = template.trailing_spacing;
        }
    }

    if config.renders_background {
        node.background = Some(resolved.background);
    }

    Ok(node)
}

/// Resolve, materialize and let the adapter patch the chip at `position`.
pub fn build_node(chip: &Chip, position: usize, cx: &ResolveContext<'_>) -> Result<ChipNode> {
    let resolved = resolver::resolve(chip, position, cx)?;
    let mut node = materialize(chip, position, resolved, cx.config, cx.resources)?;
    cx.adapter.on_node_ready(&mut node, position, chip);
    Ok(node)
}

/// Build nodes for every chip, in order.
///
/// Stops at the first failure; no partial node list is returned.
pub fn build_nodes(chips: &[Chip], cx: &ResolveContext<'_>) -> Result<Vec<ChipNode>> {
    chips
        .iter()
        .enumerate()
        .map(|(position, chip)| build_node(chip, position, cx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{ChipAdapter, DefaultAdapter};
    use crate::chip::StyledChip;
    use crate::resources::{LayoutId, NodeTemplate, ResourceTable};
    use chipflow_render::{Color, Size};

    fn table() -> ResourceTable {
        ResourceTable::new()
            .with_template(
                LayoutId(1),
                NodeTemplate::new()
                    .with_margins(ContentMargins::new(2.0, 3.0, 0.0, 5.0))
                    .with_padding(ContentMargins::uniform(4.0))
                    .with_content_slot(ContentMargins::uniform(1.0))
                    .with_text_size(11.0)
                    .with_trailing(16.0, 4.0),
            )
            .with_template(LayoutId(2), NodeTemplate::new().without_text_slot())
    }

    fn cx<'a>(
        adapter: &'a dyn ChipAdapter,
        config: &'a ChipViewConfig,
        table: &'a ResourceTable,
    ) -> ResolveContext<'a> {
        ResolveContext {
            adapter,
            config,
            resources: table,
        }
    }

    #[test]
    fn test_builtin_pill() {
        let config = ChipViewConfig::default();
        let table = table();
        let node = build_node(&Chip::from("Lorem"), 0, &cx(&DefaultAdapter, &config, &table)).unwrap();

        assert_eq!(node.layout, LayoutChoice::BuiltIn);
        assert_eq!(node.text.as_deref(), Some("Lorem"));
        assert_eq!(node.font_size, None);
        assert_eq!(node.padding, ContentMargins::symmetric(20.0, 6.0));
        assert_eq!(node.margins, ContentMargins::new(0.0, 0.0, 8.0, 8.0));
        assert!(node.background.is_some());
    }

    #[test]
    fn test_template_margins_fall_back_on_zero() {
        let config = ChipViewConfig {
            chip_text_size: Some(14.0),
            ..ChipViewConfig::default()
        };
        let table = table();
        let chip = Chip::from(StyledChip::new("close").with_layout(LayoutId(1)));
        let node = build_node(&chip, 0, &cx(&DefaultAdapter, &config, &table)).unwrap();

        assert_eq!(node.margins, ContentMargins::new(2.0, 3.0, 8.0, 5.0));
        assert_eq!(node.font_size, Some(14.0));
        assert_eq!(node.background_insets, ContentMargins::uniform(1.0));
        assert_eq!(node.trailing_width, 16.0);
    }

    #[test]
    fn test_template_text_size_used_when_inherited() {
        let config = ChipViewConfig::default();
        let table = table();
        let chip = Chip::from(StyledChip::new("close").with_layout(LayoutId(1)));
        let node = build_node(&chip, 0, &cx(&DefaultAdapter, &config, &table)).unwrap();
        assert_eq!(node.font_size, Some(11.0));
    }

    #[test]
    fn test_missing_text_slot_still_materializes() {
        let config = ChipViewConfig::default();
        let table = table();
        let chip = Chip::from(StyledChip::new("silent").with_layout(LayoutId(2)));
        let node = build_node(&chip, 0, &cx(&DefaultAdapter, &config, &table)).unwrap();
        assert_eq!(node.text, None);
    }

    #[test]
    fn test_unknown_template_fails() {
        let config = ChipViewConfig::default();
        let table = table();
        let chips = [
            Chip::from("ok"),
            Chip::from(StyledChip::new("bad").with_layout(LayoutId(404))),
        ];
        assert!(build_nodes(&chips, &cx(&DefaultAdapter, &config, &table)).is_err());
    }

    #[test]
    fn test_background_suppressed() {
        let config = ChipViewConfig {
            renders_background: false,
            ..ChipViewConfig::default()
        };
        let table = table();
        let node = build_node(&Chip::from("bare"), 0, &cx(&DefaultAdapter, &config, &table)).unwrap();
        assert!(node.background.is_none());
    }

    #[test]
    fn test_adapter_patches_node() {
        struct Tint;
        impl ChipAdapter for Tint {
            fn on_node_ready(&self, node: &mut ChipNode, position: usize, _chip: &Chip) {
                if position == 1 {
                    node.text_color = Some(Color::WHITE);
                    node.min_size = Size::new(100.0, 0.0);
                }
            }
        }

        let config = ChipViewConfig::default();
        let table = table();
        let chips = [Chip::from("a"), Chip::from("b")];
        let nodes = build_nodes(&chips, &cx(&Tint, &config, &table)).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text_color, None);
        assert_eq!(nodes[1].text_color, Some(Color::WHITE));
        assert_eq!(nodes[1].position(), 1);
        assert_eq!(nodes[1].chip(), &chips[1]);
    }
}
