//! Python bindings for the list-semantics engine.
//!
//! Elements are arbitrary Python objects. Keys are either the elements
//! themselves or the result of a caller-supplied callable, and must be `None`
//! (absent key), `bool`, `int`, `str` or `bytes`. `bool` keys compare equal to
//! the matching `int`, as they do in a Python `dict`. Ints of any size are
//! accepted.

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyDict, PyLong, PyString};

use crate::config::NullValuePolicy;
use crate::engine::antijoin_with;
use crate::error::AntijoinError;
use crate::observability;
use crate::types::JoinSide;
use crate::VERSION;

//==================================================================================
// I. Key Conversion
//==================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ScalarKey {
    Int(i64),
    /// An int outside the `i64` range, in canonical decimal form.
    BigInt(String),
    Str(String),
    Bytes(Vec<u8>),
}

fn scalar_key(key: &Bound<'_, PyAny>) -> PyResult<Option<ScalarKey>> {
    if key.is_none() {
        return Ok(None);
    }
    if key.is_instance_of::<PyBool>() {
        let flag: bool = key.extract()?;
        return Ok(Some(ScalarKey::Int(i64::from(flag))));
    }
    if key.is_instance_of::<PyLong>() {
        if let Ok(value) = key.extract::<i64>() {
            return Ok(Some(ScalarKey::Int(value)));
        }
        // Normalise int subclasses to a plain int so `str` is the decimal form.
        let exact = key.py().get_type_bound::<PyLong>().call1((key,))?;
        return Ok(Some(ScalarKey::BigInt(exact.str()?.extract()?)));
    }
    if key.is_instance_of::<PyString>() {
        return Ok(Some(ScalarKey::Str(key.extract()?)));
    }
    if let Ok(bytes) = key.downcast::<PyBytes>() {
        return Ok(Some(ScalarKey::Bytes(bytes.as_bytes().to_vec())));
    }
    Err(PyTypeError::new_err(format!(
        "unsupported antijoin key type: {}",
        key.get_type()
    )))
}

/// A Python element paired with its precomputed key.
struct Entry {
    object: PyObject,
    key: Option<ScalarKey>,
}

/// Resolves the key of every element of one side, in order.
///
/// A `None` element fails immediately with `InvalidInput`; an exception raised
/// by `key_fn` propagates unchanged.
fn collect_entries(
    py: Python<'_>,
    items: Vec<PyObject>,
    key_fn: Option<&PyObject>,
    side: JoinSide,
) -> PyResult<Vec<Entry>> {
    items
        .into_iter()
        .enumerate()
        .map(|(position, object)| -> PyResult<Entry> {
            if object.is_none(py) {
                return Err(AntijoinError::InvalidInput { side, position }.into());
            }
            let key = match key_fn {
                Some(func) => {
                    let key = func.call1(py, (object.clone_ref(py),))?;
                    scalar_key(key.bind(py))?
                }
                None => scalar_key(object.bind(py))?,
            };
            Ok(Entry { object, key })
        })
        .collect()
}

//==================================================================================
// II. Exposed Functions
//==================================================================================

/// Antijoins two Python lists.
///
/// Returns a dict with `left_complement`, `joined_pairs` (a list of
/// `(left, right)` tuples) and `right_complement`.
#[pyfunction]
#[pyo3(
    name = "antijoin",
    signature = (left, right, left_key=None, right_key=None, null_policy=None)
)]
pub fn antijoin_py(
    py: Python<'_>,
    left: Vec<PyObject>,
    right: Vec<PyObject>,
    left_key: Option<PyObject>,
    right_key: Option<PyObject>,
    null_policy: Option<String>,
) -> PyResult<Py<PyDict>> {
    let null_policy = match null_policy {
        Some(name) => name.parse::<NullValuePolicy>()?,
        None => NullValuePolicy::default(),
    };

    // Right first, matching the engine's build-then-probe order.
    let right_entries = collect_entries(py, right, right_key.as_ref(), JoinSide::Right)?;
    let left_entries = collect_entries(py, left, left_key.as_ref(), JoinSide::Left)?;

    let result = antijoin_with(
        left_entries,
        right_entries,
        |entry: &Entry| entry.key.clone(),
        |entry: &Entry| entry.key.clone(),
        null_policy,
    )?;
    let (left_complement, joined_pairs, right_complement) = result.into_parts();

    let left_complement: Vec<PyObject> = left_complement.into_iter().map(|e| e.object).collect();
    let right_complement: Vec<PyObject> =
        right_complement.into_iter().map(|e| e.object).collect();
    let joined_pairs: Vec<(PyObject, PyObject)> = joined_pairs
        .into_iter()
        .map(|pair| {
            let (l, r) = pair.into_parts();
            (l.object, r.object)
        })
        .collect();

    let result_dict = PyDict::new_bound(py);
    result_dict.set_item("left_complement", left_complement)?;
    result_dict.set_item("joined_pairs", joined_pairs)?;
    result_dict.set_item("right_complement", right_complement)?;

    Ok(result_dict.unbind())
}

#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file=None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<bool> {
    Ok(observability::init_logging(log_file.as_deref())?)
}

//==================================================================================
// III. Module Definition
//==================================================================================

/// The `antijoin` Python module, containing all exposed Rust functions.
#[pymodule]
#[pyo3(name = "antijoin")]
pub fn antijoin_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(antijoin_py, m)?)?;
    m.add_function(wrap_pyfunction!(enable_verbose_logging_py, m)?)?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_py<F: FnOnce(Python<'_>)>(f: F) {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(f);
    }

    #[test]
    fn test_scalar_key_conversion() {
        with_py(|py| {
            let key = |expr: &str| scalar_key(&py.eval_bound(expr, None, None).unwrap());

            assert_eq!(key("None").unwrap(), None);
            assert_eq!(key("True").unwrap(), Some(ScalarKey::Int(1)));
            assert_eq!(key("-7").unwrap(), Some(ScalarKey::Int(-7)));
            assert_eq!(
                key("2**64").unwrap(),
                Some(ScalarKey::BigInt("18446744073709551616".to_string()))
            );
            assert_eq!(
                key("-(2**70)").unwrap(),
                Some(ScalarKey::BigInt("-1180591620717411303424".to_string()))
            );
            assert_eq!(key("'a'").unwrap(), Some(ScalarKey::Str("a".to_string())));

            let err = key("1.5").unwrap_err();
            assert!(err.is_instance_of::<PyTypeError>(py));
        });
    }

    #[test]
    fn test_antijoin_matches_ints_beyond_i64() {
        with_py(|py| {
            let eval = |expr: &str| py.eval_bound(expr, None, None).unwrap().unbind();
            let left = vec![eval("2**64"), eval("1")];
            let right = vec![eval("2**64"), eval("2**65")];

            let result = antijoin_py(py, left, right, None, None, None).unwrap();
            let result = result.bind(py);
            let part = |name: &str| result.get_item(name).unwrap().unwrap();

            assert_eq!(part("joined_pairs").len().unwrap(), 1);
            assert_eq!(part("left_complement").extract::<Vec<i64>>().unwrap(), vec![1]);
            assert_eq!(
                part("right_complement").str().unwrap().to_string(),
                "[36893488147419103232]"
            );
        });
    }
}
