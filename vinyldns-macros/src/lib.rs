#[macro_export]
/// The `query_params!` macro collects the fields of a filter struct into the
/// `(key, value)` pairs sent as an API query string.
///
/// Each entry names a field of the source value, how it is collected, and the
/// query key it is sent under:
/// - `required` fields are always emitted
/// - `optional` fields (`Option<T>`) are emitted only when they are `Some`
/// - `repeated` fields (`Vec<T>`) emit one pair per element
///
/// Every field type must implement `Display`.
///
/// # Usage
///
/// ```rust
/// use vinyldns_macros::query_params;
///
/// struct Filter {
///     name_sort: &'static str,
///     max_items: Option<u32>,
///     types: Vec<&'static str>,
/// }
///
/// let filter = Filter { name_sort: "ASC", max_items: Some(10), types: vec!["A", "CNAME"] };
/// let params = query_params!(filter, {
///     required name_sort => "nameSort",
///     optional max_items => "maxItems",
///     repeated types => "recordTypeFilter",
/// });
///
/// assert_eq!(params.len(), 4);
/// ```
macro_rules! query_params {
    (@push $params:ident, $src:expr, required $field:ident => $key:literal) => {
        $params.push(($key, $src.$field.to_string()));
    };
    (@push $params:ident, $src:expr, optional $field:ident => $key:literal) => {
        if let Some(value) = &$src.$field {
            $params.push(($key, value.to_string()));
        }
    };
    (@push $params:ident, $src:expr, repeated $field:ident => $key:literal) => {
        for value in &$src.$field {
            $params.push(($key, value.to_string()));
        }
    };

    // Main macro
    (
        $src:expr,
        {
            $( $kind:ident $field:ident => $key:literal ),* $(,)?
        }
    ) => {{
        let mut params: Vec<(&'static str, String)> = Vec::new();
        $(
            $crate::query_params!(@push params, $src, $kind $field => $key);
        )*
        params
    }};
}
