//! Request key construction
//!
//! A request is identified by its endpoint and its query parameters. The key
//! format is `<endpoint>_<k1>_<v1>_<k2>_<v2>...` with the `k_v` fragments
//! sorted, so existing cache files written in this format keep matching.

/// Separator between the endpoint and every parameter fragment
const CONNECTOR: &str = "_";

/// Builds the cache key for a request.
///
/// The result does not depend on the iteration order of `params`.
/// Fragments are not escaped, so a key or value containing `_` can make two
/// distinct requests share a key.
///
/// # Arguments
/// * `endpoint` - The URL of the API endpoint
/// * `params` - The query parameters as key/value pairs
pub fn construct_key<I, K, V>(endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut fragments: Vec<String> = params
        .into_iter()
        .map(|(k, v)| format!("{}{}{}", k.as_ref(), CONNECTOR, v.as_ref()))
        .collect();
    fragments.sort();

    format!("{}{}{}", endpoint, CONNECTOR, fragments.join(CONNECTOR))
}
