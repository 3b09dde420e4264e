//! Layered resolution: frame, fallback frame, previous item

use super::test_utils::{counting_context, item, viewer_context, CountingEvaluator};
use invero::frame::{Frame, NbtTemplate, TagTemplate};
use invero::icon::{IconElement, Scale, Slot};
use invero::item::{AttributeModifier, Enchantment, ItemFlag, TagCompound, TagValue};
use invero::platform::Platform;
use invero::render::{Attribute, Renderer};
use std::sync::Arc;

#[test]
fn test_frame_overrides_fallback_per_attribute() {
    let default = Frame::builder()
        .name("Default name")
        .lore(["Default lore"])
        .amount("{{count}}")
        .build();
    let frame = Frame::builder().name("Hello {{viewer}}").build();

    let ctx = viewer_context(&[("count", "12")]);
    let out = Renderer::default().generate_properties(item("stone"), &frame, &default, &ctx);

    assert_eq!(out.display_name.as_deref(), Some("§7Hello Steve"));
    assert_eq!(out.lore, vec!["§7Default lore".to_string()]);
    assert_eq!(out.amount, 12);
}

#[test]
fn test_frame_as_its_own_default_keeps_previous_values() {
    let frame = Frame::builder().name("Only").build();
    let mut base = item("stone");
    base.lore = vec!["kept".to_string()];
    base.durability = 7;

    let out = Renderer::default().generate_properties(base, &frame, &frame, &viewer_context(&[]));
    assert_eq!(out.display_name.as_deref(), Some("§7Only"));
    assert_eq!(out.lore, vec!["kept".to_string()]);
    assert_eq!(out.durability, 7);
}

#[test]
fn test_static_override_skips_evaluation() {
    let evaluator = Arc::new(CountingEvaluator::default());
    let ctx = counting_context(&evaluator);
    let frame = Frame::builder()
        .amount("{{count}}")
        .static_amount(3)
        .static_glow(true)
        .glow("{{shiny}}")
        .build();

    let out = Renderer::default().generate_properties(item("stone"), &frame, &frame, &ctx);
    assert_eq!(out.amount, 3);
    assert!(out.flags.contains(&ItemFlag::HideEnchants));
    assert_eq!(evaluator.calls(), 0);
}

#[test]
fn test_negative_amount_clamped() {
    let frame = Frame::builder().amount("{{count}}").build();
    let out = Renderer::default().generate_properties(
        item("stone"),
        &frame,
        &frame,
        &viewer_context(&[("count", "-4")]),
    );
    assert_eq!(out.amount, 0);
}

#[test]
fn test_unbreakable_never_cleared() {
    let frame = Frame::builder().unbreakable("false").build();
    let mut base = item("diamond_sword");
    base.unbreakable = true;
    let out = Renderer::default().generate_properties(base, &frame, &frame, &viewer_context(&[]));
    assert!(out.unbreakable);
}

#[test]
fn test_glow_on_enchanted_book_uses_stored_enchants() {
    let on = Frame::builder().glow("true").build();
    let book = Renderer::default().generate_properties(
        item("enchanted_book"),
        &on,
        &on,
        &viewer_context(&[]),
    );
    assert_eq!(book.stored_enchants.get(&Enchantment::GLOW_MARKER), Some(&1));
    assert!(book.enchants.is_empty());

    let off = Frame::builder().glow("false").build();
    let mut both = book.clone();
    both.enchants.insert(Enchantment::GLOW_MARKER, 1);
    let cleared = Renderer::default().generate_properties(both, &off, &off, &viewer_context(&[]));
    assert!(!cleared.enchants.contains_key(&Enchantment::GLOW_MARKER));
    assert!(!cleared.stored_enchants.contains_key(&Enchantment::GLOW_MARKER));
}

#[test]
fn test_item_model_blank_clears_and_malformed_keeps() {
    let renderer = Renderer::new(Platform::new(12102));
    let ctx = viewer_context(&[]);

    let set = Frame::builder().item_model("invero:ruby").build();
    let with_model = renderer.generate_properties(item("stone"), &set, &set, &ctx);
    assert_eq!(
        with_model.item_model.as_ref().map(|k| k.to_string()),
        Some("invero:ruby".to_string())
    );

    let bad = Frame::builder().item_model("a:b:c").build();
    let resolution = renderer.resolve(with_model.clone(), &bad, &bad, &ctx);
    assert!(resolution.failed(Attribute::ItemModel));
    assert_eq!(resolution.item.item_model, with_model.item_model);

    let blank = Frame::builder().item_model("   ").build();
    let cleared = renderer.generate_properties(with_model, &blank, &blank, &ctx);
    assert!(cleared.item_model.is_none());
}

#[test]
fn test_hide_attributes_drops_modifiers_on_new_platforms() {
    let frame = Frame::builder().flags(["hide attributes"]).build();
    let mut base = item("diamond_sword");
    base.attribute_modifiers.push(AttributeModifier {
        attribute: "generic.attack_damage".to_string(),
        amount: 7.0,
    });

    let old = Renderer::new(Platform::new(12004)).generate_properties(
        base.clone(),
        &frame,
        &frame,
        &viewer_context(&[]),
    );
    assert!(old.flags.contains(&ItemFlag::HideAttributes));
    assert_eq!(old.attribute_modifiers.len(), 1);

    let new = Renderer::new(Platform::new(12100)).generate_properties(
        base,
        &frame,
        &frame,
        &viewer_context(&[]),
    );
    assert!(new.flags.contains(&ItemFlag::HideAttributes));
    assert!(new.attribute_modifiers.is_empty());
}

#[test]
fn test_nbt_template_merges_over_existing_tags() {
    let template = NbtTemplate::new()
        .with("owner", TagTemplate::Text("{{viewer}}".to_string()))
        .with("broken", TagTemplate::Text("{{missing}}".to_string()));
    let default = Frame::builder().nbt(template).build();
    let frame = Frame::builder().name("Own").build();

    let mut base = item("stone");
    base.tag.insert("owner", TagValue::String("nobody".to_string()));
    base.tag.insert("keep", TagValue::Int(1));

    let resolution = Renderer::default().resolve(base, &frame, &default, &viewer_context(&[]));
    let tag = &resolution.item.tag;
    assert_eq!(tag.get("owner"), Some(&TagValue::String("Steve".to_string())));
    assert_eq!(tag.get("keep"), Some(&TagValue::Int(1)));
    assert!(tag.get("broken").is_none());
    assert!(!resolution.failed(Attribute::Nbt));
}

#[test]
fn test_static_nbt_wins_over_template() {
    let fixed: TagCompound = [("tier".to_string(), TagValue::Int(5))].into_iter().collect();
    let frame = Frame::builder()
        .nbt(NbtTemplate::new().with("tier", TagTemplate::Text("{{tier}}".to_string())))
        .static_nbt(fixed)
        .build();

    let out = Renderer::default().generate_properties(
        item("stone"),
        &frame,
        &frame,
        &viewer_context(&[("tier", "9")]),
    );
    assert_eq!(out.tag.get("tier"), Some(&TagValue::Int(5)));
}

#[test]
fn test_render_for_without_texture_updates_icon() {
    let frame = Frame::builder()
        .name("Slot item")
        .slot(Slot::index(4))
        .shared();
    let default = Frame::builder().amount("2").shared();
    let icon = IconElement::new(viewer_context(&[]), item("stone"));

    Renderer::default().render_for(&frame, &Scale::chest(3), &icon, &default, true);

    let rendered = icon.item_stack();
    assert_eq!(rendered.display_name.as_deref(), Some("§7Slot item"));
    assert_eq!(rendered.amount, 2);
    assert_eq!(icon.slots(), vec![4]);
}

#[test]
fn test_render_for_leaves_slots_when_not_requested() {
    let frame = Frame::builder().slot(Slot::index(4)).shared();
    let icon = IconElement::new(viewer_context(&[]), item("stone"));
    icon.set_slots(vec![1]);

    Renderer::default().render_for(&frame, &Scale::chest(3), &icon, &frame, false);
    assert_eq!(icon.slots(), vec![1]);
}
