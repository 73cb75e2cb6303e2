//! Library of parser functions for geof lines
//!
//! Every parser expects a line with leading and trailing whitespace already
//! removed.

// nom parser combinators
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{space0, space1, u32, u8};
use nom::combinator::{all_consuming, map};
use nom::multi::{count, many0};
use nom::number::complete::double;
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;

// ! Boolean checks
/// Check for the `**node` section marker
pub fn is_node_section(i: &str) -> bool {
    i.starts_with("**node")
}

/// Check for the `**element` section marker
pub fn is_element_section(i: &str) -> bool {
    i.starts_with("**element")
}

/// Check for the `***group` section marker
pub fn is_group_section(i: &str) -> bool {
    i.starts_with("***group")
}

/// Check for the `***return` terminator
pub fn is_return(i: &str) -> bool {
    i.starts_with("***return")
}

/// Check for the start of an element group
pub fn is_elset(i: &str) -> bool {
    i.starts_with("**elset")
}

/// Check for the start of a line group
pub fn is_liset(i: &str) -> bool {
    i.starts_with("**liset")
}

/// Check for any marker line, which all start with `*`
pub fn is_marker(i: &str) -> bool {
    i.starts_with('*')
}

// ! Parser combinators

/// Any run of non-whitespace characters
fn word(i: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(i)
}

/// Node count and spatial dimension following `**node`, e.g. `8 3`
pub fn node_header(i: &str) -> IResult<&str, (usize, u8)> {
    all_consuming(tuple((
        map(u32, |n| n as usize),
        preceded(space1, u8),
    )))(i)
}

/// Single count, used for the number of elements following `**element`
pub fn record_count(i: &str) -> IResult<&str, usize> {
    all_consuming(map(u32, |n| n as usize))(i)
}

/// Node record `id x y [z]` with exactly `dim` coordinates
///
/// Missing coordinates are left as `0.0`.
pub fn node_record(i: &str, dim: usize) -> IResult<&str, (u32, [f64; 3])> {
    let (i, (id, values)) =
        all_consuming(tuple((u32, count(preceded(space1, double), dim))))(i)?;

    let mut coordinates = [0.0; 3];
    for (c, v) in coordinates.iter_mut().zip(values) {
        *c = v;
    }
    Ok((i, (id, coordinates)))
}

/// Element record `id type n1 n2 ...` into the id, type tag, and node ids
pub fn element_record(i: &str) -> IResult<&str, (u32, &str, Vec<u32>)> {
    all_consuming(tuple((
        u32,
        preceded(space1, word),
        terminated(many0(preceded(space1, u32)), space0),
    )))(i)
}

/// Name following a group marker, e.g. `grain_1` from `**elset grain_1`
pub fn group_name(i: &str) -> IResult<&str, &str> {
    preceded(tuple((tag("**"), word, space1)), word)(i)
}

/// Whitespace separated list of identifiers, which may be empty
pub fn id_list(i: &str) -> IResult<&str, Vec<u32>> {
    all_consuming(many0(terminated(u32, space0)))(i)
}

/// Liset segment record, reduced to its two end points
///
/// - `line a b` gives `[a, b]`
/// - `quad a b c d` gives `[a, c]`, dropping the mid-side nodes
///
/// Any other segment tag is not a boundary line and gives `None`, whatever
/// follows it.
pub fn segment(i: &str) -> IResult<&str, Option<[u32; 2]>> {
    let (rest, kind) = word(i)?;
    if kind != "line" && kind != "quad" {
        return Ok(("", None));
    }

    let (i, ids) = all_consuming(terminated(many0(preceded(space1, u32)), space0))(rest)?;
    let points = match (kind, ids.as_slice()) {
        ("line", [a, b, ..]) => [*a, *b],
        ("quad", [a, _, c, ..]) => [*a, *c],
        _ => return Err(too_short(i)),
    };

    Ok((i, Some(points)))
}

/// Error for segment records without enough node ids
fn too_short(i: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(i, nom::error::ErrorKind::Count))
}
