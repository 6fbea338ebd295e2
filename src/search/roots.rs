//! Discovery of the top-level paths searched in all-roots mode.
//!
//! Mounted volumes come from a [`VolumeSource`]; only valid, ready and
//! writable volumes are kept. When the platform reports nothing usable the
//! enumerator falls back to drive letters on Windows and `/` elsewhere.

use std::fs;
use std::path::{Path, PathBuf};

use sysinfo::Disks;

/// A mounted volume as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
	pub root: PathBuf,
	pub valid: bool,
	pub ready: bool,
	pub read_only: bool,
}

impl Volume {
	fn is_searchable(&self) -> bool {
		self.valid && self.ready && !self.read_only
	}
}

/// Platform facility listing mounted volumes.
pub trait VolumeSource {
	fn volumes(&self) -> Vec<Volume>;
}

/// Anything able to produce the ordered list of roots for an all-roots run.
pub trait RootSource {
	fn roots(&self) -> Vec<PathBuf>;
}

impl RootSource for Vec<PathBuf> {
	fn roots(&self) -> Vec<PathBuf> {
		self.clone()
	}
}

/// Resolves the roots to scan from a [`VolumeSource`] with a platform fallback.
#[derive(Debug, Clone, Default)]
pub struct RootEnumerator<S = SystemVolumes> {
	source: S,
}

impl RootEnumerator<SystemVolumes> {
	/// Enumerator backed by the operating system's disk list.
	pub fn system() -> Self {
		Self {
			source: SystemVolumes,
		}
	}
}

impl<S: VolumeSource> RootEnumerator<S> {
	pub fn with_source(source: S) -> Self {
		Self { source }
	}

	/// Ordered, de-duplicated list of searchable roots.
	pub fn enumerate_roots(&self) -> Vec<PathBuf> {
		let mut roots: Vec<PathBuf> = Vec::new();
		for volume in self.source.volumes() {
			if !volume.is_searchable() {
				log::debug!("skipping volume {}", volume.root.display());
				continue;
			}
			if !roots.contains(&volume.root) {
				roots.push(volume.root);
			}
		}

		if roots.is_empty() {
			log::debug!("no usable volumes reported, using platform fallback");
			roots = fallback_roots();
		}
		roots
	}
}

impl<S: VolumeSource> RootSource for RootEnumerator<S> {
	fn roots(&self) -> Vec<PathBuf> {
		self.enumerate_roots()
	}
}

#[cfg(windows)]
fn fallback_roots() -> Vec<PathBuf> {
	('A'..='Z')
		.map(|letter| PathBuf::from(format!("{letter}:\\")))
		.filter(|path| path.is_dir())
		.collect()
}

#[cfg(not(windows))]
fn fallback_roots() -> Vec<PathBuf> {
	let root = PathBuf::from("/");
	if root.is_dir() { vec![root] } else { Vec::new() }
}

/// Filesystem types that never hold user files.
const PSEUDO_FILESYSTEMS: &[&str] = &[
	"autofs",
	"binfmt_misc",
	"bpf",
	"cgroup",
	"cgroup2",
	"configfs",
	"debugfs",
	"devpts",
	"devtmpfs",
	"efivarfs",
	"fusectl",
	"hugetlbfs",
	"mqueue",
	"nsfs",
	"proc",
	"pstore",
	"rpc_pipefs",
	"securityfs",
	"selinuxfs",
	"squashfs",
	"sysfs",
	"tracefs",
];

const PSEUDO_MOUNT_PREFIXES: &[&str] = &["/proc", "/sys", "/dev", "/run"];

/// Volume source backed by the operating system's disk list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemVolumes;

impl VolumeSource for SystemVolumes {
	fn volumes(&self) -> Vec<Volume> {
		let disks = Disks::new_with_refreshed_list();
		disks
			.list()
			.iter()
			.map(|disk| {
				classify_volume(
					disk.mount_point(),
					&disk.file_system().to_string_lossy(),
					disk.is_read_only(),
					mount_point_ready,
				)
			})
			.collect()
	}
}

fn mount_point_ready(path: &Path) -> bool {
	fs::read_dir(path).is_ok()
}

/// Turn a reported disk into a [`Volume`]. `ready` decides whether the mount
/// point is currently accessible and is only asked for valid volumes.
pub(crate) fn classify_volume(
	root: &Path,
	fs_type: &str,
	read_only: bool,
	ready: impl Fn(&Path) -> bool,
) -> Volume {
	let valid = !root.as_os_str().is_empty() && !is_pseudo_mount(root, fs_type);
	Volume {
		root: root.to_path_buf(),
		valid,
		ready: valid && ready(root),
		read_only,
	}
}

fn is_pseudo_mount(root: &Path, fs_type: &str) -> bool {
	PSEUDO_FILESYSTEMS.contains(&fs_type)
		|| PSEUDO_MOUNT_PREFIXES
			.iter()
			.any(|prefix| root.starts_with(prefix))
}
