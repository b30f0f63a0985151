use pretty_assertions::assert_eq;

use super::{assert_fully_solved, in_function, parsed};
use crate::{pretty_print, FlatTokens, GscData, IsWithin};

const SCRIPT: &str = "\
#include maps\\mp\\_utility;
#using_animtree(\"multiplayer\");

init() {
	level.teams = [];
	level.spawn_delay = -1.5;
	game[\"state\"] = \"playing\";
	precacheShader(\"white\");
	thread onPlayerConnect();
}

onPlayerConnect() {
	for (;;) {
		level waittill(\"connected\", player);
		player.kills = 0;
		player thread onSpawn(::onDeath, %idle_anim);
	}
}

onSpawn(callback, anim) {
	self endon(\"disconnect\");

	for (i = 0; i < level.teams.size; i++) {
		if (!isDefined(level.teams[i]))
			continue;
		else if (level.teams[i] == self.team)
			break;
		else {
			origin = self.origin + (0, 0, 16);
			self [[ callback ]](origin);
		}
	}

	switch (self.team) {
		case \"allies\":
		case \"axis\":
			self.score += 10;
			break;
		default:
			self.score = (int)getDvar(\"score\");
	}

	foreach (key, value in level.teams) {
		wait 0.05;
	}

	do {
		self.health--;
	} while (self.health > 0 ? true : false);

	/#
	println(\"spawned \" + self.name);
	#/

	return maps\\mp\\gametypes\\_globallogic::getSpawn();
}

/#
debugSpawns() {
	level.debug_spawns = true;
}
#/
";

fn assert_ranges_nest(data: &GscData) {
	let tree = &data.tree;

	for id in tree.pre_order() {
		let children = tree.children(id);
		let (first, last) = match (children.first(), children.last()) {
			(Some(&first), Some(&last)) => (first, last),
			_ => continue,
		};

		assert_eq!(tree.node(id).tokens.start, tree.node(first).tokens.start);
		assert_eq!(tree.node(id).tokens.end, tree.node(last).tokens.end);

		for &child in children {
			assert_eq!(tree.parent(child), Some(id));
			assert!(
				tree.range(child).is_within(&tree.range(id)),
				"{:?} is not within its parent {:?}",
				child,
				id
			);
		}
	}
}

#[test_log::test]
fn realistic_script_is_fully_solved() {
	let data = parsed(SCRIPT);

	assert_fully_solved(&data);
	assert_eq!(data.defects(), vec![]);
	assert_eq!(data.functions.len(), 4);
}

#[test_log::test]
fn ranges_nest() {
	assert_ranges_nest(&parsed(SCRIPT));
	assert_ranges_nest(&parsed("main() { a = (1 + ; } ] foo( { #/ /#"));
}

#[test]
fn leaves_cover_every_token_once() {
	let data = parsed(SCRIPT);
	let mut tokens = vec![];
	data.tree
		.children(data.tree.root())
		.flat_tokens(&data.tree, &mut tokens);

	assert_eq!(tokens.len(), data.tree.tokens().len());
	assert!(tokens
		.iter()
		.zip(data.tree.tokens())
		.all(|(leaf, token)| leaf.index == token.index));
}

#[test]
fn sibling_positions_are_found() {
	for source in [SCRIPT, "main() { a = (1 + ; } ] foo( { #/ /#"] {
		let data = parsed(source);
		let tree = &data.tree;

		for id in tree.pre_order() {
			for (index, &child) in tree.children(id).iter().enumerate() {
				assert_eq!(tree.index_in_parent(child).ok(), Some(index));
				let prev = index.checked_sub(1).map(|prev| tree.children(id)[prev]);
				assert_eq!(tree.prev_sibling(child), prev);
			}
		}
	}
}

#[test]
fn long_flat_function() {
	let data = parsed(&in_function(&"a = b - 1;\n".repeat(5_000)));

	assert_eq!(data.defects(), vec![]);
	assert_eq!(
		data.function("main").map(|main| main.local_variable_defs.len()),
		Some(5_000)
	);
}

#[test_log::test]
fn grouping_is_stable_under_reformatting() {
	let data = parsed(SCRIPT);
	let printed = pretty_print(&data.tree);
	let reparsed = parsed(&printed);

	assert_fully_solved(&reparsed);
	assert_eq!(data.tree.shape(), reparsed.tree.shape());
	assert_eq!(printed, pretty_print(&reparsed.tree));
}

#[test_log::test]
fn parsing_is_deterministic() {
	let first = parsed(SCRIPT);
	let second = parsed(SCRIPT);

	assert_eq!(format!("{:?}", first.tree), format!("{:?}", second.tree));
}

#[test]
fn deep_nesting_does_not_overflow() {
	let depth = 10_000;
	let source = in_function(&format!(
		"x = {}1{};",
		"(".repeat(depth),
		")".repeat(depth)
	));

	let data = parsed(&source);
	assert_eq!(data.defects(), vec![]);

	let unclosed = format!("main() {{ {}", "{".repeat(depth));
	let data = parsed(&unclosed);
	assert_eq!(data.defects().len(), depth + 1);
}

#[test]
fn malformed_input_never_fails() {
	let sources = [
		"",
		";",
		"}}}}",
		"((((",
		"main(",
		"main() {",
		"/# /# #/",
		"if else while for foreach switch case default do",
		"a = = = ;",
		"x ? : ;",
		"[[ ]]()",
		"::",
		"#include",
		"level.",
		"self thread",
		"for(;;;) {}",
		"foreach() {}",
		"case 1: default:",
	];

	for source in sources.iter() {
		let data = parsed(source);
		let _ = data.defects();
		assert_ranges_nest(&data);
	}
}
