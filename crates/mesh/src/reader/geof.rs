// crate modules
use crate::element::ElementType;
use crate::error::{Error, Result};
use crate::group::{LineGroup, ALL_ELEMENT};
use crate::index::{IdentifierIndex, DEFAULT_ID_CEILING};
use crate::reader::parsers;
use crate::Mesh;

// fetools modules
use fetools_format::f;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info, trace, warn};

/// Current position of the [GeofReader] in the file
///
/// Sections must appear in the order listed. Anything between sections is
/// ignored until the marker of the next section is found.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    /// First line of the file, which is skipped
    #[default]
    Header,
    /// Looking for `**node`
    SeekNodes,
    /// Expecting the node count and dimension
    NodeCount,
    /// Reading node records
    Nodes { remaining: usize },
    /// Looking for `**element`
    SeekElements,
    /// Expecting the element count
    ElementCount,
    /// Reading element records
    Elements { remaining: usize },
    /// Looking for `***group`
    SeekGroups,
    /// Inside the group section, between groups
    Groups,
    /// Collecting element identifiers for an `**elset`
    Elset { name: String, ids: Vec<u32> },
    /// Skipping the members of an explicit `ALL_ELEMENT` elset
    AllElement,
    /// Collecting segments for an `**liset`
    Liset(LineGroup),
    /// Reached `***return`, everything else is ignored
    Done,
}

/// A streaming reader for ASCII geof mesh files
///
/// The reader is a state machine over the lines of the file. Each call to
/// [GeofReader::process_line()] moves it through the [Phase]s of the format
/// while building up the [Mesh], which is handed over by
/// [GeofReader::finish()].
///
/// Minimal Example:
/// ```rust
/// # use fetools_mesh::reader::GeofReader;
/// let lines = [
///     "***geometry",
///     "**node",
///     "3 2",
///     "1 0.0 0.0",
///     "2 1.0 0.0",
///     "3 0.0 1.0",
///     "**element",
///     "1",
///     "1 c2d3 1 2 3",
///     "***return",
/// ];
///
/// let mut reader = GeofReader::new();
/// reader.disable_progress();
/// for line in lines {
///     reader.process_line(line).unwrap();
/// }
///
/// let mesh = reader.finish().unwrap();
/// assert_eq!(mesh.element_count(), 1);
/// assert_eq!(mesh.integration_point_count(), 4);
/// ```
pub struct GeofReader {
    /// Mesh being built
    mesh: Mesh,
    /// Current state of the parser
    phase: Phase,
    /// Node identifier lookup, built when the node section is complete
    node_index: IdentifierIndex,
    /// Largest identifier accepted before asking for a renumbered mesh
    id_ceiling: u32,
    /// Number of lines processed so far, for error messages
    line_number: usize,
    /// Number of elements skipped for unsupported types
    skipped: usize,
    /// Disable progress bar?
    disable_progress: bool,
    /// Progress over the element records, if enabled
    progress_bar: Option<Bar>,
}

impl Default for GeofReader {
    fn default() -> Self {
        Self {
            mesh: Mesh::default(),
            phase: Phase::Header,
            node_index: IdentifierIndex::default(),
            id_ceiling: DEFAULT_ID_CEILING,
            line_number: 0,
            skipped: 0,
            disable_progress: false,
            progress_bar: None,
        }
    }
}

impl std::fmt::Debug for GeofReader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("GeofReader")
            .field("phase", &self.phase)
            .field("line_number", &self.line_number)
            .field("skipped", &self.skipped)
            .field("id_ceiling", &self.id_ceiling)
            .finish_non_exhaustive()
    }
}

// ! ------------------------------------------------------------------------
// !                                Public API
// ! ------------------------------------------------------------------------

impl GeofReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Parse the geof file at `path` into a [Mesh]
    pub fn parse(&mut self, path: &Path) -> Result<Mesh> {
        info!("Reading {:?}", path.file_name().unwrap_or(path.as_os_str()));
        let reader = BufReader::new(File::open(path)?);
        self.parse_reader(reader)
    }

    /// Parse geof content from any buffered source into a [Mesh]
    ///
    /// Anything left over from an earlier file, including one that failed
    /// part way through, is discarded first.
    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<Mesh> {
        self.reset();
        for line in reader.lines() {
            self.process_line(&line?)?;
            if self.phase == Phase::Done {
                break;
            }
        }
        self.finish()
    }

    /// Do not print the kdam progress indicators
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    /// Largest node identifier accepted, 10^8 by default
    pub fn set_id_ceiling(&mut self, ceiling: u32) {
        self.id_ceiling = ceiling;
    }

    /// Current state of the parser
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Mesh as built so far
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Number of elements skipped so far for unsupported types
    pub fn skipped_elements(&self) -> usize {
        self.skipped
    }

    /// Process the next line of the file
    pub fn process_line(&mut self, line: &str) -> Result<()> {
        self.line_number += 1;
        let line = line.trim();

        self.phase = match std::mem::take(&mut self.phase) {
            Phase::Header => Phase::SeekNodes,
            Phase::SeekNodes if parsers::is_node_section(line) => {
                debug!("Found node section on line {}", self.line_number);
                Phase::NodeCount
            }
            Phase::SeekNodes => Phase::SeekNodes,
            Phase::NodeCount => self.node_header(line)?,
            Phase::Nodes { remaining } => {
                self.node(line)?;
                self.after_node(remaining - 1)?
            }
            Phase::SeekElements if parsers::is_element_section(line) => {
                debug!("Found element section on line {}", self.line_number);
                Phase::ElementCount
            }
            Phase::SeekElements => Phase::SeekElements,
            Phase::ElementCount => self.element_header(line)?,
            Phase::Elements { remaining } => {
                self.element(line)?;
                if let Some(bar) = self.progress_bar.as_mut() {
                    bar.update(1)?;
                }
                self.after_element(remaining - 1)
            }
            Phase::SeekGroups if parsers::is_group_section(line) => {
                debug!("Found group section on line {}", self.line_number);
                Phase::Groups
            }
            Phase::SeekGroups if parsers::is_return(line) => {
                debug!("No group section before ***return");
                Phase::Done
            }
            Phase::SeekGroups => Phase::SeekGroups,
            Phase::Groups => self.group_marker(line)?,
            Phase::Elset { name, ids } if parsers::is_marker(line) => {
                self.mesh.append_to_group(&name, ids);
                self.group_marker(line)?
            }
            Phase::Elset { name, mut ids } => {
                let (_, values) = parsers::id_list(line)
                    .map_err(|_| self.error(f!("could not read elset {name:?} ids from {line:?}")))?;
                ids.extend(values);
                Phase::Elset { name, ids }
            }
            Phase::AllElement if parsers::is_marker(line) => self.group_marker(line)?,
            Phase::AllElement => Phase::AllElement,
            Phase::Liset(group) if parsers::is_marker(line) => {
                self.mesh.add_line_group(group);
                self.group_marker(line)?
            }
            Phase::Liset(group) if line.is_empty() => {
                self.mesh.add_line_group(group);
                Phase::Groups
            }
            Phase::Liset(mut group) => {
                let (_, segment) = parsers::segment(line).map_err(|_| {
                    self.error(f!("could not read liset {:?} segment from {line:?}", group.name))
                })?;
                match segment {
                    Some(points) => group.segments.push(points),
                    None => trace!("Ignoring segment {line:?}"),
                }
                Phase::Liset(group)
            }
            Phase::Done => Phase::Done,
        };

        Ok(())
    }

    /// Hand over the completed mesh
    ///
    /// Fails if the file ended before the node and element sections were
    /// read in full. The reader is reset and may be used for another file.
    pub fn finish(&mut self) -> Result<Mesh> {
        let phase = std::mem::take(&mut self.phase);
        let mut mesh = std::mem::take(&mut self.mesh);
        let (line, skipped) = (self.line_number, self.skipped);
        self.reset();

        match phase {
            Phase::Header | Phase::SeekNodes | Phase::NodeCount | Phase::Nodes { .. } => {
                return Err(Error::ParseError {
                    line,
                    reason: "missing or incomplete **node section".to_string(),
                });
            }
            Phase::SeekElements | Phase::ElementCount | Phase::Elements { .. } => {
                return Err(Error::ParseError {
                    line,
                    reason: "missing or incomplete **element section".to_string(),
                });
            }
            Phase::SeekGroups => debug!("No group section found"),
            Phase::Groups | Phase::AllElement => warn!("Group section not closed by ***return"),
            Phase::Elset { name, ids } => {
                warn!("Group section not closed by ***return");
                mesh.append_to_group(&name, ids);
            }
            Phase::Liset(group) => {
                warn!("Group section not closed by ***return");
                mesh.add_line_group(group);
            }
            Phase::Done => (),
        }

        mesh.update_integration_points();

        if skipped > 0 {
            warn!("{skipped} elements skipped for unsupported types");
        }
        debug!(
            "Read {} nodes, {} elements, {} elsets, {} lisets",
            mesh.node_count(),
            mesh.element_count(),
            mesh.elsets.len(),
            mesh.lisets.len()
        );

        Ok(mesh)
    }

    /// Drop everything belonging to the current file, keeping the settings
    fn reset(&mut self) {
        self.mesh = Mesh::default();
        self.phase = Phase::Header;
        self.node_index = IdentifierIndex::default();
        self.line_number = 0;
        self.skipped = 0;
        self.progress_bar = None;
    }
}

// ! ------------------------------------------------------------------------
// !                          Node and element sections
// ! ------------------------------------------------------------------------

impl GeofReader {
    /// Structural error at the current line
    fn error(&self, reason: String) -> Error {
        Error::ParseError {
            line: self.line_number,
            reason,
        }
    }

    /// Node count and dimension, which also sets up a new mesh
    fn node_header(&mut self, line: &str) -> Result<Phase> {
        let (_, (n_nodes, dimension)) = parsers::node_header(line)
            .map_err(|_| self.error(f!("expected node count and dimension, found {line:?}")))?;

        if !(2..=3).contains(&dimension) {
            return Err(self.error(f!("dimension must be 2 or 3, found {dimension}")));
        }
        debug!("Expecting {n_nodes} nodes in {dimension}D");

        self.mesh = Mesh::new(dimension);
        self.mesh.nodes.reserve(n_nodes);
        self.after_node(n_nodes)
    }

    /// Parse a single node record
    fn node(&mut self, line: &str) -> Result<()> {
        let dim = self.mesh.dimension as usize;
        let (_, (id, coordinates)) = parsers::node_record(line, dim)
            .map_err(|_| self.error(f!("expected node with {dim} coordinates, found {line:?}")))?;

        let rank = self.mesh.add_node(id, coordinates);
        trace!("Node {id} => rank {rank}");
        Ok(())
    }

    /// Move on to the element section once every node is read
    fn after_node(&mut self, remaining: usize) -> Result<Phase> {
        if remaining > 0 {
            return Ok(Phase::Nodes { remaining });
        }

        self.node_index = IdentifierIndex::with_ceiling(&self.mesh.nodes, self.id_ceiling)?;
        if self.node_index.len() != self.mesh.node_count() {
            return Err(self.error("duplicate node identifiers".to_string()));
        }
        debug!("Indexed {} nodes", self.node_index.len());

        Ok(Phase::SeekElements)
    }

    /// Element count, which also sets up the progress bar
    fn element_header(&mut self, line: &str) -> Result<Phase> {
        let (_, n_elements) = parsers::record_count(line)
            .map_err(|_| self.error(f!("expected element count, found {line:?}")))?;
        debug!("Expecting {n_elements} elements");

        self.mesh.elements.reserve(n_elements);
        if n_elements > 0 {
            self.progress_bar = Some(self.init_progress_bar(n_elements)?);
        }
        Ok(self.after_element(n_elements))
    }

    /// Parse a single element record, skipping unsupported types
    fn element(&mut self, line: &str) -> Result<()> {
        let (_, (id, tag, node_ids)) = parsers::element_record(line)
            .map_err(|_| self.error(f!("expected element record, found {line:?}")))?;

        let kind = match ElementType::try_from(tag) {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Skipping element {id}: {e}");
                self.skipped += 1;
                return Ok(());
            }
        };

        if node_ids.len() < kind.node_count() {
            return Err(self.error(f!(
                "element {id} ({kind}) needs {} nodes, found {}",
                kind.node_count(),
                node_ids.len()
            )));
        }

        let ranks = node_ids
            .iter()
            .take(kind.node_count())
            .map(|&node| {
                self.node_index
                    .get(node)
                    .ok_or(Error::UnresolvedNode { element: id, node })
            })
            .collect::<Result<Vec<usize>>>()?;

        let rank = self.mesh.add_element(id, kind, ranks)?;
        trace!("Element {id} ({kind}) => rank {rank}");
        Ok(())
    }

    /// Move on to the group section once every element is read
    fn after_element(&mut self, remaining: usize) -> Phase {
        if remaining > 0 {
            return Phase::Elements { remaining };
        }

        // need an extra line for clean spacing if the progress bar is printed
        if self.progress_bar.take().is_some() && !self.disable_progress {
            eprintln!()
        }
        Phase::SeekGroups
    }

    /// Initialise the progress bar, if wanted
    fn init_progress_bar(&self, total: usize) -> Result<Bar> {
        let mut bar = BarBuilder::default()
            .total(total)
            .desc("elements")
            .unit(" elements")
            .unit_scale(true)
            .disable(self.disable_progress)
            .build()
            .map_err(Error::ProgressBar)?;

        if !self.disable_progress {
            bar.refresh()?;
        }
        Ok(bar)
    }
}

// ! ------------------------------------------------------------------------
// !                               Group section
// ! ------------------------------------------------------------------------

impl GeofReader {
    /// Decide what a line means between groups
    ///
    /// Anything that does not start a new group or end the section is
    /// ignored.
    fn group_marker(&self, line: &str) -> Result<Phase> {
        if parsers::is_return(line) {
            return Ok(Phase::Done);
        }

        if !(parsers::is_elset(line) || parsers::is_liset(line)) {
            if !line.is_empty() {
                trace!("Ignoring {line:?} in group section");
            }
            return Ok(Phase::Groups);
        }

        let (_, name) = parsers::group_name(line)
            .map_err(|_| self.error(f!("expected a group name in {line:?}")))?;

        if parsers::is_liset(line) {
            Ok(Phase::Liset(LineGroup::new(name)))
        } else if name == ALL_ELEMENT {
            debug!("Skipping explicit {ALL_ELEMENT} elset");
            Ok(Phase::AllElement)
        } else {
            Ok(Phase::Elset {
                name: name.to_string(),
                ids: Vec::new(),
            })
        }
    }
}
