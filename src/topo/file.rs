//! 拓扑文本格式
//!
//! ```text
//! # 注释
//! [nodes]
//! node = 1 TransparentNode SwitchingSelect 0
//! node = 2 TranslucentNode BroadcastAndSelect 4
//! [links]
//! -> = 1 2 100
//! -> = 2 1 100
//! ```
//!
//! 文件中节点编号从 1 开始且必须连续；内存中的 `NodeId` 为编号减一。
//! 链路按出现顺序插入，因此 `write_topology(parse_topology(s))` 与 `s` 字段一致。

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::{TopologyError, TopologyResult};
use crate::net::{NodeArchitecture, NodeId, NodeType, Topology};
use crate::phy::PhysicalParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Nodes,
    Links,
}

fn parse_err(line: usize, msg: impl Into<String>) -> TopologyError {
    TopologyError::Parse {
        line,
        msg: msg.into(),
    }
}

fn field<'a>(fields: &[&'a str], i: usize, line: usize, what: &str) -> TopologyResult<&'a str> {
    fields
        .get(i)
        .copied()
        .ok_or_else(|| parse_err(line, format!("missing {what}")))
}

fn number<T: std::str::FromStr>(s: &str, line: usize, what: &str) -> TopologyResult<T> {
    s.parse()
        .map_err(|_| parse_err(line, format!("invalid {what} '{s}'")))
}

pub fn parse_topology(text: &str, phy: Arc<PhysicalParams>) -> TopologyResult<Topology> {
    let mut topo = Topology::new(phy);
    let mut section = Section::None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = match name.trim() {
                "nodes" => Section::Nodes,
                "links" => Section::Links,
                other => return Err(parse_err(line_no, format!("unknown section [{other}]"))),
            };
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_err(line_no, "expected 'key = value'"));
        };
        let fields: Vec<&str> = value.split_whitespace().collect();
        match (section, key.trim()) {
            (Section::Nodes, "node") => {
                let id: usize = number(field(&fields, 0, line_no, "node id")?, line_no, "node id")?;
                let type_kw = field(&fields, 1, line_no, "node type")?;
                let arch_kw = field(&fields, 2, line_no, "node architecture")?;
                let regs: u32 = number(
                    field(&fields, 3, line_no, "regenerator count")?,
                    line_no,
                    "regenerator count",
                )?;
                let node_type = NodeType::from_keyword(type_kw)
                    .ok_or_else(|| parse_err(line_no, format!("unknown node type '{type_kw}'")))?;
                let arch = NodeArchitecture::from_keyword(arch_kw).ok_or_else(|| {
                    parse_err(line_no, format!("unknown node architecture '{arch_kw}'"))
                })?;
                let expected = topo.num_nodes() + 1;
                if id >= 1 && id < expected {
                    return Err(TopologyError::DuplicateNode(id));
                }
                if id != expected {
                    return Err(TopologyError::NonSequentialNode { expected, got: id });
                }
                topo.add_node(node_type, arch, regs);
            }
            (Section::Links, "->") => {
                let from: usize = number(field(&fields, 0, line_no, "origin")?, line_no, "origin")?;
                let to: usize =
                    number(field(&fields, 1, line_no, "destination")?, line_no, "destination")?;
                let length: f64 = number(field(&fields, 2, line_no, "length")?, line_no, "length")?;
                for id in [from, to] {
                    if id == 0 || id > topo.num_nodes() {
                        return Err(TopologyError::UnknownNode(id));
                    }
                }
                topo.add_link(NodeId(from - 1), NodeId(to - 1), length)?;
            }
            (Section::None, _) => {
                return Err(parse_err(line_no, "entry outside of a section"));
            }
            (_, other) => return Err(parse_err(line_no, format!("unexpected key '{other}'"))),
        }
    }
    Ok(topo)
}

pub fn load_topology(path: &Path, phy: Arc<PhysicalParams>) -> TopologyResult<Topology> {
    let text = fs::read_to_string(path)?;
    let topo = parse_topology(&text, phy)?;
    info!(
        path = %path.display(),
        nodes = topo.num_nodes(),
        links = topo.num_links(),
        "拓扑加载完成"
    );
    Ok(topo)
}

pub fn write_topology(topo: &Topology) -> String {
    let mut out = String::from("[nodes]\n");
    for node in topo.nodes() {
        let _ = writeln!(
            out,
            "node = {} {} {} {}",
            node.id().label(),
            node.node_type().keyword(),
            node.architecture().keyword(),
            node.num_regenerators()
        );
    }
    out.push_str("\n[links]\n");
    for link in topo.links() {
        let _ = writeln!(
            out,
            "-> = {} {} {}",
            link.from().label(),
            link.to().label(),
            link.length_km()
        );
    }
    out
}

pub fn save_topology(topo: &Topology, path: &Path) -> TopologyResult<()> {
    fs::write(path, write_topology(topo))?;
    Ok(())
}
