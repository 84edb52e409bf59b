use taskmap::output::{command_name_from, format_human, HumanOutput};

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|arg| arg.to_string()).collect()
}

#[test]
fn format_human_includes_sections() {
    let mut human = HumanOutput::new("taskmap graph: 3 nodes, 2 edges");
    human.push_summary("team", "Red");
    human.push_detail("[x] Intro (t1_intro)");
    human.push_warning("t9 requires unknown task 'ghost'");
    human.push_next_step("taskmap team list");

    let rendered = format_human(&human);
    assert!(rendered.contains("taskmap graph: 3 nodes, 2 edges"));
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("- team: Red"));
    assert!(rendered.contains("Details:"));
    assert!(rendered.contains("- [x] Intro (t1_intro)"));
    assert!(rendered.contains("Warnings:"));
    assert!(rendered.contains("- t9 requires unknown task 'ghost'"));
    assert!(rendered.contains("Next steps:"));
    assert!(rendered.contains("- taskmap team list"));
}

#[test]
fn format_human_omits_empty_sections() {
    let human = HumanOutput::new("taskmap view show");
    let rendered = format_human(&human);
    assert_eq!(rendered, "taskmap view show");
}

#[test]
fn command_name_includes_group_subcommand() {
    assert_eq!(command_name_from(args(&["team", "select", "red"])), "team select");
    assert_eq!(command_name_from(args(&["--json", "view", "zoom", "in"])), "view zoom");
    assert_eq!(command_name_from(args(&["graph"])), "graph");
}

#[test]
fn command_name_skips_option_values() {
    assert_eq!(
        command_name_from(args(&["--data-dir", "maps", "--store", "s.json", "task", "show", "t1"])),
        "task show"
    );
    assert_eq!(command_name_from(args(&[])), "taskmap");
}
