#[macro_export]
macro_rules! hashmap {
	($($key:expr => $value:expr),*$(,)?) => {{
		let mut hashmap = ::std::collections::HashMap::new();
		$(hashmap.insert($key, $value);)*

		hashmap
	}}
}

#[macro_export]
macro_rules! hashset {
	($($value:expr),*$(,)?) => {{
		let mut hashset = ::std::collections::HashSet::new();
		$(hashset.insert($value);)*

		hashset
	}}
}
