//! Property tests for help summaries, invocation names and link ordering.

use clap::Command;
use proptest::prelude::*;

use cmdtree::dispatch::link::{SUMMARY_MAX_CHARS, invocation_name, short_summary};
use cmdtree::tree::CommandPath;
use cmdtree::{Assembler, AssemblyOptions, Registry};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn summary_never_exceeds_threshold(description in "\\PC{0,120}") {
        let summary = short_summary(Some(description.as_str())).unwrap_or_default();
        prop_assert!(summary.chars().count() <= SUMMARY_MAX_CHARS);
    }

    #[test]
    fn short_descriptions_pass_through(description in "\\PC{0,50}") {
        prop_assert_eq!(short_summary(Some(description.as_str())), Some(description.clone()));
    }

    #[test]
    fn long_descriptions_keep_a_prefix(description in "\\PC{51,200}") {
        let summary = short_summary(Some(description.as_str())).unwrap_or_default();
        let prefix: String = description.chars().take(SUMMARY_MAX_CHARS - 4).collect();
        prop_assert_eq!(summary, format!("{prefix} ..."));
    }

    #[test]
    fn invocation_name_has_one_word_per_level(
        prog in segment_strategy(),
        parents in prop::collection::vec(segment_strategy(), 0..6),
        child in segment_strategy(),
    ) {
        let parent: CommandPath = parents.iter().cloned().collect();
        let name = invocation_name(&prog, &parent, &child);
        let words: Vec<&str> = name.split(' ').collect();
        prop_assert_eq!(words.len(), parents.len() + 2);
        prop_assert_eq!(words[0], prog.as_str());
        prop_assert_eq!(words[words.len() - 1], child.as_str());
    }

    #[test]
    fn sorted_assembly_ignores_registration_order(
        names in prop::collection::btree_set(segment_strategy(), 1..8),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let build = |order: &[String]| {
            let registry = order.iter().fold(Registry::new(), |registry, name| {
                registry.command(&format!("group/{name}"), Command::new(name.clone()).about(format!("Run {name}")))
            });
            Assembler::new(AssemblyOptions {
                prog: Some("prog".to_string()),
                sort_siblings: true,
                ..AssemblyOptions::default()
            })
            .assemble(&registry)
        };

        let mut reversed = names.clone();
        reversed.reverse();
        let mut forward = build(&names).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let mut backward = build(&reversed).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let group = |cli: &mut Command| {
            cli.find_subcommand_mut("group")
                .map(|g| g.render_help().to_string())
                .unwrap_or_default()
        };
        prop_assert_eq!(group(&mut forward), group(&mut backward));
    }
}
