use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind, Lines},
    path::Path,
};

use crate::graph::{Cost, GraphEdit, GraphNew, NumVertices, Vertex, INFINITE_COST, MAX_EDGE_COST};

pub type Result<T> = std::io::Result<T>;

pub trait TspRead: Sized {
    fn try_read_tsp<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_tsp_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl<G> TspRead for G
where
    G: GraphNew + GraphEdit,
{
    fn try_read_tsp<R: BufRead>(reader: R) -> Result<Self> {
        let tsp_reader = TspReader::try_new(reader)?;
        let mut graph = Self::new(tsp_reader.number_of_vertices());
        tsp_reader.read_into(&mut graph)?;
        Ok(graph)
    }

    fn try_read_tsp_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_tsp(buf_reader)
    }
}

/// Parses the instance format
///
/// ```text
/// c arbitrary comment lines
/// p tsp <n>
/// v <label>       (optional; exactly n lines when present, i-th labels vertex i)
/// <n rows of n cost tokens; a token is a non-negative integer, "inf" or "-">
/// ```
pub struct TspReader<R> {
    lines: Lines<R>,
    number_of_vertices: NumVertices,
}

macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new($kind, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

impl<R: BufRead> TspReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut tsp_reader = Self {
            lines: reader.lines(),
            number_of_vertices: 0,
        };

        tsp_reader.number_of_vertices = tsp_reader.parse_header()?;
        Ok(tsp_reader)
    }

    pub fn number_of_vertices(&self) -> NumVertices {
        self.number_of_vertices
    }

    /// Consumes the remainder of the input and stores labels and costs
    /// into `graph`, which must already have [`Self::number_of_vertices`]
    /// vertices.
    pub fn read_into<G: GraphEdit>(mut self, graph: &mut G) -> Result<()> {
        let n = self.number_of_vertices;

        let mut row: Vertex = 0;
        let mut labels: NumVertices = 0;

        while let Some(line) = self.next_non_comment_line()? {
            if let Some(label) = line.strip_prefix("v ") {
                raise_error_unless!(
                    row == 0 && labels < n,
                    ErrorKind::InvalidData,
                    "Unexpected label line"
                );

                let label = label.trim();
                raise_error_unless!(!label.is_empty(), ErrorKind::InvalidData, "Empty label");

                graph.set_label(labels, label.to_string());
                labels += 1;
                continue;
            }

            raise_error_unless!(
                row < n,
                ErrorKind::InvalidData,
                "Expected end of file after the last matrix row"
            );

            let mut parts = line.split_whitespace();
            for col in 0..n {
                let cost = parse_cost(parts.next(), row, col)?;
                graph.set_cost(row, col, cost);
            }

            raise_error_unless!(
                parts.next().is_none(),
                ErrorKind::InvalidData,
                format!("Trailing tokens in matrix row {row}")
            );

            row += 1;
        }

        raise_error_unless!(
            labels == 0 || labels == n,
            ErrorKind::InvalidData,
            format!("Expected 0 or {n} label lines, found {labels}")
        );

        raise_error_unless!(
            row == n,
            ErrorKind::InvalidData,
            format!("Expected {n} matrix rows, found {row}")
        );

        Ok(())
    }

    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.starts_with('c') => continue,
                Some(Ok(line)) if line.trim().is_empty() => continue,
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    fn parse_header(&mut self) -> Result<NumVertices> {
        let line = self.next_non_comment_line()?;

        raise_error_unless!(line.is_some(), ErrorKind::InvalidData, "No header found");
        let line = line.unwrap();

        let mut parts = line.split(' ').filter(|t| !t.is_empty());

        raise_error_unless!(
            parts.next() == Some("p"),
            ErrorKind::InvalidData,
            "Invalid header found; line should start with p"
        );

        raise_error_unless!(
            parts.next() == Some("tsp"),
            ErrorKind::InvalidData,
            "Invalid header found; file type should be \"tsp\""
        );

        let number_of_vertices = parse_next_value!(parts, "Header>Number of vertices");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            "Invalid header found; expected end of line"
        );

        Ok(number_of_vertices)
    }
}

fn parse_cost(token: Option<&str>, row: Vertex, col: Vertex) -> Result<Cost> {
    let name = || format!("Cost({row},{col})");

    let token = token.ok_or_else(|| {
        std::io::Error::new(
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", name()),
        )
    })?;

    if token == "inf" || token == "-" {
        return Ok(INFINITE_COST);
    }

    let cost: Cost = token.parse().map_err(|_| {
        std::io::Error::new(
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", name()),
        )
    })?;

    raise_error_unless!(
        cost <= MAX_EDGE_COST,
        ErrorKind::InvalidData,
        format!("{} exceeds the supported maximum edge cost", name())
    );

    Ok(cost)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::*;

    use glob::glob;
    use itertools::Itertools;
    use std::fs::File;
    use std::io::BufReader;

    #[test]
    fn test_success() {
        const DEMO_FILE: &str = "c TEST\n p  tsp 3 \nv Aachen\nc TEST\nv Bonn\nv Celle\n0 2 9\n1 0 -\n9 inf 0";
        let buf_reader = std::io::BufReader::new(DEMO_FILE.as_bytes());
        let tsp_reader = TspReader::try_new(buf_reader).unwrap();

        assert_eq!(tsp_reader.number_of_vertices(), 3);

        let mut matrix = CostMatrix::new(3);
        tsp_reader.read_into(&mut matrix).unwrap();

        assert_eq!(matrix.label(0), "Aachen");
        assert_eq!(matrix.label(1), "Bonn");
        assert_eq!(matrix.label(2), "Celle");

        assert_eq!(matrix.cost(0, 1), 2);
        assert_eq!(matrix.cost(1, 0), 1);
        assert_eq!(matrix.cost(1, 2), INFINITE_COST);
        assert_eq!(matrix.cost(2, 1), INFINITE_COST);
        assert_eq!(matrix.cost(2, 2), 0);
    }

    #[test]
    fn test_labels_are_optional() {
        const DEMO_FILE: &str = "p tsp 2\n0 5\n7 0\n";
        let matrix = CostMatrix::try_read_tsp(DEMO_FILE.as_bytes()).unwrap();

        assert_eq!(matrix.label(0), "1");
        assert_eq!(matrix.label(1), "2");
        assert_eq!(matrix.cost(0, 1), 5);
        assert_eq!(matrix.cost(1, 0), 7);
    }

    #[test]
    fn test_rejects_malformed() {
        for broken in [
            "",                              // no header
            "p ds 2\n0 5\n7 0",              // wrong file type
            "p tsp\n",                       // missing vertex count
            "p tsp 2 7\n0 5\n7 0",           // trailing header token
            "p tsp 2\n0 5\n7 0\n0 0",        // too many rows
            "p tsp 2\n0 5",                  // too few rows
            "p tsp 2\n0 5 1\n7 0",           // too many columns
            "p tsp 2\n0\n7 0",               // too few columns
            "p tsp 2\n0 x\n7 0",             // unparsable cost
            "p tsp 2\nv A\n0 5\n7 0",        // label count != n
            "p tsp 2\n0 5\nv A\nv B\n7 0",   // label after first row
            "p tsp 2\n0 18446744073709551615\n7 0", // cost collides with sentinel
        ] {
            let result = CostMatrix::try_read_tsp(broken.as_bytes());
            assert!(result.is_err(), "input: {broken:?}");
            assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidData);
        }
    }

    #[test]
    fn test_read_tiny_instances() {
        let files = glob("instances/tiny/*.tsp")
            .expect("Failed to glob")
            .map(|r| r.expect("Failed to access globbed path"))
            .collect_vec();

        assert!(!files.is_empty());

        for file in files {
            let reader = File::open(file.clone()).expect("Cannot open file");
            let buf_reader = BufReader::new(reader);

            let matrix =
                CostMatrix::try_read_tsp(buf_reader).expect("Could not parse instance");

            assert!(matrix.number_of_vertices() >= 1, "file: {}", file.display());
        }
    }
}
