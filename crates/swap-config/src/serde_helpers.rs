//! Serde helpers for chain-keyed configuration maps

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use swap_types::Chain;

/// Deserializes `{ "ETH" = ..., "avax" = ... }` into a map keyed by [`Chain`].
pub fn deserialize_chain_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<Chain, T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	let map = HashMap::<String, T>::deserialize(deserializer)?;

	map.into_iter()
		.map(|(k, v)| {
			k.parse::<Chain>()
				.map(|chain| (chain, v))
				.map_err(|_| serde::de::Error::custom(format!("Invalid chain: {}", k)))
		})
		.collect()
}

/// Serializes a [`Chain`]-keyed map with the chain's ticker as key.
pub fn serialize_chain_map<S, T>(map: &BTreeMap<Chain, T>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
	T: Serialize,
{
	let string_map: BTreeMap<&str, &T> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();

	string_map.serialize(serializer)
}
