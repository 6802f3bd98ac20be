/// A contract the deploy scripts know about.
pub struct ContractInfo {
	/// Key under which its addresses are recorded in the address book.
	pub name: &'static str,
	/// Contracts whose current addresses are passed to its constructor,
	/// in argument order.
	pub dependencies: &'static [&'static str],
	/// Deploy tags that select it.
	pub tags: &'static [&'static str],
	/// Deployed by the scripts. External contracts (LINK, VRF wrapper,
	/// router) are only recorded, never deployed.
	pub deployed: bool,
}

/// Every contract of the game, in deploy order.
pub struct Manifest {
	contracts: &'static [ContractInfo],
}

impl Manifest {
	pub fn all(&self) -> impl Iterator<Item = &ContractInfo> {
		self.contracts.iter()
	}

	pub fn lookup(&self, name: &str) -> Option<&ContractInfo> {
		self.contracts.iter().find(|c| c.name == name)
	}

	/// Contracts selected by a deploy tag, in deploy order.
	pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ContractInfo> {
		self.contracts.iter().filter(move |c| c.tags.iter().any(|t| *t == tag))
	}
}

/// The MouseGame deployment manifest.
pub static MANIFEST: Manifest = Manifest {
	contracts: &[
		ContractInfo {
			name: "linkToken",
			dependencies: &[],
			tags: &[],
			deployed: false,
		},
		ContractInfo {
			name: "chainLinkWrapper",
			dependencies: &[],
			tags: &[],
			deployed: false,
		},
		ContractInfo {
			name: "uniswapRouter2",
			dependencies: &[],
			tags: &[],
			deployed: false,
		},
		ContractInfo {
			name: "MouseGame",
			dependencies: &["linkToken", "chainLinkWrapper", "uniswapRouter2"],
			tags: &["game", "all"],
			deployed: true,
		},
		ContractInfo {
			name: "MouseNFT",
			dependencies: &["MouseGame"],
			tags: &["mouse", "all", "deploy"],
			deployed: true,
		},
		ContractInfo {
			name: "CheeseToken",
			dependencies: &["MouseGame", "MouseNFT"],
			tags: &["cheese", "all"],
			deployed: true,
		},
		ContractInfo {
			name: "PrizeToken",
			dependencies: &["MouseGame"],
			tags: &["prize", "all"],
			deployed: true,
		},
	],
};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dependencies_are_declared_earlier() {
		let order: Vec<_> = MANIFEST.all().map(|c| c.name).collect();
		for (i, c) in MANIFEST.all().enumerate() {
			for dep in c.dependencies {
				let pos = order.iter().position(|n| n == dep);
				assert!(
					pos.is_some_and(|p| p < i),
					"{} depends on {dep}, which must come first",
					c.name
				);
			}
		}
	}

	#[test]
	fn external_contracts_have_no_tags() {
		for c in MANIFEST.all().filter(|c| !c.deployed) {
			assert!(c.tags.is_empty(), "{} should not be selectable", c.name);
			assert!(c.dependencies.is_empty());
		}
	}

	#[test]
	fn tag_selection() {
		let all: Vec<_> = MANIFEST.with_tag("all").map(|c| c.name).collect();
		assert_eq!(all, ["MouseGame", "MouseNFT", "CheeseToken", "PrizeToken"]);

		let cheese: Vec<_> = MANIFEST.with_tag("cheese").map(|c| c.name).collect();
		assert_eq!(cheese, ["CheeseToken"]);

		assert_eq!(MANIFEST.with_tag("nope").count(), 0);
	}

	#[test]
	fn lookup_by_name() {
		let game = MANIFEST.lookup("MouseGame").unwrap();
		assert_eq!(game.dependencies.len(), 3);
		assert!(MANIFEST.lookup("mousegame").is_none());
	}
}
