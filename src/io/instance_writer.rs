use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use super::super::graph::*;

pub trait TspWrite {
    fn try_write_tsp<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
    fn try_write_tsp_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error>;
}

impl<T> TspWrite for T
where
    T: GraphOrder + EdgeCosts + VertexLabels,
{
    fn try_write_tsp<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(writer, "p tsp {}", self.number_of_vertices())?;

        for u in self.vertices() {
            writeln!(writer, "v {}", self.label(u))?;
        }

        for u in self.vertices() {
            let row = self
                .vertices()
                .map(|v| match self.cost(u, v) {
                    INFINITE_COST => "inf".to_string(),
                    c => c.to_string(),
                })
                .join(" ");
            writeln!(writer, "{row}")?;
        }

        Ok(())
    }

    fn try_write_tsp_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_tsp(writer)
    }
}
