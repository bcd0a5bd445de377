/// Wavefront OBJ loader for wireframes (vertices, lines and faces only)
use std::collections::HashSet;

use nalgebra::Point3;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{char, i64 as signed, space0, space1},
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    number::complete::double,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Edge, Wireframe};

/// One statement of interest in an OBJ file
#[derive(Debug, PartialEq)]
enum Statement {
    Vertex(f64, f64, f64),
    Line(Vec<i64>),
    Face(Vec<i64>),
}

/// Parse OBJ source text into a wireframe.
///
/// Faces become closed edge loops, polylines become open chains. Repeated
/// edges are kept once regardless of direction.
pub fn parse_obj(input: &str) -> Result<Wireframe> {
    let mut vertices = Vec::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut seen = HashSet::new();

    for (number, raw) in input.lines().enumerate() {
        let line_no = number + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        let keyword = line.split_whitespace().next().unwrap_or_default();
        if !matches!(keyword, "v" | "l" | "f") {
            continue;
        }

        let statement = match all_consuming(terminated(statement, space0))(line) {
            Ok((_, statement)) => statement,
            Err(e) => {
                return Err(Error::Parse {
                    line: line_no,
                    message: format!("malformed `{}` statement: {:?}", keyword, e),
                })
            }
        };

        let (refs, closed) = match statement {
            Statement::Vertex(x, y, z) => {
                vertices.push(Point3::new(x, y, z));
                continue;
            }
            Statement::Line(refs) => (refs, false),
            Statement::Face(refs) => (refs, true),
        };

        let indices = refs
            .iter()
            .map(|&r| resolve_index(r, vertices.len(), line_no))
            .collect::<Result<Vec<_>>>()?;

        let mut chain: Vec<Edge> = indices.windows(2).map(|w| (w[0], w[1])).collect();
        if closed && indices.len() > 2 {
            chain.push((indices[indices.len() - 1], indices[0]));
        }

        for (a, b) in chain {
            if a != b && seen.insert((a.min(b), a.max(b))) {
                edges.push((a, b));
            }
        }
    }

    log::debug!("parsed OBJ: {} vertices, {} edges", vertices.len(), edges.len());
    Wireframe::new(vertices, edges)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(at) => &line[..at],
        None => line,
    }
}

/// Turn a 1-based (or negative, relative) OBJ index into a 0-based one
fn resolve_index(reference: i64, vertex_count: usize, line: usize) -> Result<usize> {
    let resolved = if reference > 0 {
        Some(reference - 1)
    } else if reference < 0 {
        Some(vertex_count as i64 + reference)
    } else {
        None
    };

    match resolved {
        Some(i) if i >= 0 && (i as usize) < vertex_count => Ok(i as usize),
        _ => Err(Error::VertexReference {
            line,
            reference,
            vertex_count,
        }),
    }
}

fn statement(input: &str) -> IResult<&str, Statement> {
    alt((vertex, line_element, face))(input)
}

fn vertex(input: &str) -> IResult<&str, Statement> {
    let (input, _) = char('v')(input)?;
    let (input, (x, y, z)) = tuple((
        preceded(space1, double),
        preceded(space1, double),
        preceded(space1, double),
    ))(input)?;
    let (input, _) = opt(preceded(space1, double))(input)?;
    Ok((input, Statement::Vertex(x, y, z)))
}

fn line_element(input: &str) -> IResult<&str, Statement> {
    map(preceded(pair(char('l'), space1), references), Statement::Line)(input)
}

fn face(input: &str) -> IResult<&str, Statement> {
    map(preceded(pair(char('f'), space1), references), Statement::Face)(input)
}

fn references(input: &str) -> IResult<&str, Vec<i64>> {
    separated_list1(space1, reference)(input)
}

/// `7`, `7/2`, `7//3` or `7/2/3`; only the vertex index is kept
fn reference(input: &str) -> IResult<&str, i64> {
    let (input, index) = signed(input)?;
    let (input, _) = opt(preceded(
        tag("/"),
        take_till(|c: char| c.is_whitespace()),
    ))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TETRA: &str = "\
# tetrahedron
o tetra
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1.5 1.0
vn 0 0 1
f 1 2 3
f 1/1 2/2 4/3
l 3 4
";

    #[test]
    fn test_parse_tetrahedron() {
        let model = parse_obj(TETRA).unwrap();
        assert_eq!(model.vertices().len(), 4);
        assert_eq!(model.vertices()[3], Point3::new(0.0, 0.0, 1.5));
        // 3 edges of the first face, 2 new from the second, 1 from the line
        assert_eq!(
            model.edges(),
            &[(0, 1), (1, 2), (2, 0), (1, 3), (3, 0), (2, 3)]
        );
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let model = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nl -3 -1\n").unwrap();
        assert_eq!(model.edges(), &[(0, 2)]);
    }

    #[test]
    fn test_face_with_normals_only() {
        let model = parse_obj("v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1//1 2//1 3//1\n").unwrap();
        assert_eq!(model.edges().len(), 3);
    }

    #[test]
    fn test_out_of_range_index() {
        let err = parse_obj("v 0 0 0\nv 1 0 0\nl 1 5\n").unwrap_err();
        assert_eq!(
            err,
            Error::VertexReference {
                line: 3,
                reference: 5,
                vertex_count: 2
            }
        );

        let err = parse_obj("v 0 0 0\nl 0 1\n").unwrap_err();
        assert!(matches!(err, Error::VertexReference { reference: 0, .. }));
    }

    #[test]
    fn test_negative_out_of_range_keeps_token() {
        let err = parse_obj("v 0 0 0\nl 1 -5\n").unwrap_err();
        assert_eq!(
            err,
            Error::VertexReference {
                line: 2,
                reference: -5,
                vertex_count: 1
            }
        );
        assert_eq!(err.to_string(), "line 2: vertex reference -5 out of range (1 vertices)");
    }

    #[test]
    fn test_malformed_vertex_reports_line() {
        let err = parse_obj("v 0 0 0\n\nv 1 two 3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_demo_pyramid() {
        let model = parse_obj(include_str!("../../demos/pyramid.obj")).unwrap();
        assert_eq!(model.vertices().len(), 5);
        // 4 base edges and 4 running up to the apex
        assert_eq!(model.edges().len(), 8);
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(parse_obj("# nothing here\n"), Err(Error::EmptyModel));
    }
}
