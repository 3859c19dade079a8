//! Exports RON content trees end to end.

use std::fs;
use std::path::Path;

use export_core::{CollectError, ExportContext, ExportError, WriteMode, WriteOutcome};
use tempfile::TempDir;

fn write(root: &Path, file: &str, content: &str) {
    let path = root.join(file);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn seed(root: &Path) {
    write(
        root,
        "items/Sword.ron",
        r#"Item(
    kind: Weapon,
    rank: SR,
    tags: ["weapon", "melee"],
    stack_limit: 1,
    price: Some(120),
    icon_tint: (r: 1.0, g: 0.5, b: 0.25, a: 1.0),
    editor_notes: "rebalance after beta",
)"#,
    );
    write(
        root,
        "items/Potion.ron",
        r#"// healing
Item(
    kind: Consumable,
    rank: N,
    stack_limit: 99,
)"#,
    );
    write(
        root,
        "pets/Mochi.ron",
        r#"Pet(
    rank: SSR,
    element: Water,
    base_stats: (hp: 120, attack: 30, defense: 12, speed: 1.5, crit_rate: 0.05),
    skills: ["Splash", "Bubble"],
    favourite_food: "Potion",
    evolves_into: "Mochi",
    model_offset: (x: 0.0, y: 1.23456, z: -0.0001),
)"#,
    );
    write(
        root,
        "skills/Splash.ron",
        r#"Skill(
    element: Water,
    range: 2.5,
    levels: [
        (level: 1, power: 10.0, cooldown: 1.0, description: "A small \"splash\"."),
        (level: 2, power: 14.5, cooldown: 0.8, description: "Bigger.", unlocks: Some("Bubble")),
    ],
)"#,
    );
    write(root, "skills/Bubble.ron", "Skill(passive: true)");
    write(
        root,
        "rewards/Starter.ron",
        r#"Reward(
    rolls: 2,
    entries: [
        (item: "Sword", amount: 1, weight: 0.5),
        (item: "Potion", amount: 3, weight: 1.5),
    ],
    guaranteed: Some("Potion"),
)"#,
    );
    write(
        root,
        "shop/PotionDeal.ron",
        r#"ShopEntry(item: "Potion", currency: Gem, price: 5, featured: true)"#,
    );
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_export_all_writes_every_schema() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content");
    let out = dir.path().join("lua");
    seed(&content);

    let registry = game_content::registry(&content).unwrap();
    let pipeline = game_content::pipeline(&registry).unwrap();
    let ctx = ExportContext {
        output_root: &out,
        pipeline: &pipeline,
        mode: WriteMode::Write,
    };

    let summary = registry.export_all(&ctx);
    assert!(summary.is_success(), "{:?}", summary.failures);
    assert_eq!(summary.schemas_exported(), 5);
    assert_eq!(summary.total_records(), 7);
    assert_eq!(summary.warning_count(), 0);
    assert_eq!(summary.count(WriteOutcome::Written), 5);

    let items = read(&out.join("ItemConfig.lua"));
    assert!(items.contains(
        r#"local ItemConfig = {
    Potion = {
        kind = "Consumable",
        rank = "N",
        tags = {},
        stack_limit = 99,
        price = nil,
        icon_tint = {1, 1, 1, 1},
    },
    Sword = {
        kind = "Weapon",
        rank = "SR",
        tags = {"weapon", "melee"},
        stack_limit = 1,
        price = 120,
        icon_tint = {1, 0.5, 0.25, 1},
    },
}"#
    ));
    assert!(!items.contains("editor_notes"));
    assert!(!items.contains("rebalance"));

    let pets = read(&out.join("PetConfig.lua"));
    assert!(pets.contains("---@field skills string[]\n"));
    assert!(pets.contains("---@field base_stats table\n"));
    assert!(pets.contains("---@field model_offset number[]\n"));
    assert!(pets.contains("        skills = {\"Splash\", \"Bubble\"},\n"));
    assert!(pets.contains("        favourite_food = \"Potion\",\n"));
    assert!(pets.contains("        evolves_into = \"Mochi\",\n"));
    assert!(pets.contains("        model_offset = {0, 1.235, 0},\n"));
    assert!(pets.contains("            crit_rate = 0.05,\n"));

    let skills = read(&out.join("SkillConfig.lua"));
    assert!(skills.contains(r#"description = "A small \"splash\".","#));
    assert!(skills.contains("                unlocks = \"Bubble\",\n"));
    assert!(skills.contains("    Bubble = {\n        element = \"Neutral\",\n        passive = true,\n"));

    let rewards = read(&out.join("RewardConfig.lua"));
    assert!(rewards.contains(
        r#"        entries = {
            {
                item = "Sword",
                amount = 1,
                weight = 0.5,
            },
            {
                item = "Potion",
                amount = 3,
                weight = 1.5,
            },
        },
        guaranteed = "Potion",
"#
    ));

    let shop = read(&out.join("ShopEntryConfig.lua"));
    assert!(shop.contains("        currency = \"Gem\",\n"));
    assert!(shop.contains("        stock = nil,\n"));
    assert!(shop.ends_with("return ShopEntryConfig\n"));
}

#[test]
fn test_rerun_reports_unchanged() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content");
    let out = dir.path().join("lua");
    seed(&content);

    let registry = game_content::registry(&content).unwrap();
    let pipeline = game_content::pipeline(&registry).unwrap();
    let ctx = ExportContext {
        output_root: &out,
        pipeline: &pipeline,
        mode: WriteMode::Write,
    };

    registry.export_all(&ctx);
    let summary = registry.export_all(&ctx);
    assert_eq!(summary.count(WriteOutcome::Unchanged), 5);

    write(&content, "items/Potion.ron", "Item(kind: Consumable, stack_limit: 50)");
    let check = ExportContext {
        mode: WriteMode::Check,
        ..ctx
    };
    let report = registry.export_one("Item", &check).unwrap();
    assert_eq!(report.outcome, WriteOutcome::WouldWrite);
    assert!(read(&out.join("ItemConfig.lua")).contains("stack_limit = 99,"));
}

#[test]
fn test_broken_schema_does_not_block_others() {
    let dir = TempDir::new().unwrap();
    let content = dir.path().join("content");
    let out = dir.path().join("lua");
    seed(&content);
    write(&content, "pets/Broken.ron", "Pet(rank: Mythic)");
    fs::remove_dir_all(content.join("shop")).unwrap();

    let registry = game_content::registry(&content).unwrap();
    let pipeline = game_content::pipeline(&registry).unwrap();
    let ctx = ExportContext {
        output_root: &out,
        pipeline: &pipeline,
        mode: WriteMode::Write,
    };
    let summary = registry.export_all(&ctx);

    assert_eq!(summary.schemas_exported(), 3);
    let failed: Vec<_> = summary.failures.iter().map(|f| f.schema.as_str()).collect();
    assert_eq!(failed, ["Pet", "ShopEntry"]);
    assert!(matches!(
        &summary.failures[0].error,
        ExportError::Collect(CollectError::Decode { path, .. }) if path.ends_with("Broken.ron")
    ));
    assert!(matches!(
        &summary.failures[1].error,
        ExportError::Collect(CollectError::MissingLocation(_))
    ));
    assert!(out.join("ItemConfig.lua").exists());
    assert!(!out.join("PetConfig.lua").exists());
}
