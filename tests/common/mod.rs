#![allow(dead_code)]

use std::path::Path;

use hdf5::types::{FixedAscii, VarLenUnicode};
use hdf5::{File, Group, H5Type};
use ndarray::{Array, ArrayD, Dimension};
use rand::Rng;

/// Create a demonstration dataset with `steps.len()` episodes named `demo_0`, `demo_1`,
/// .. where episode `i` has `steps[i]` samples.
pub fn demo_file(path: &Path, env: &str, steps: &[usize]) {
    let f = File::create(path).unwrap();
    let data = f.create_group("data").unwrap();

    data.new_attr::<u64>()
        .create("total")
        .unwrap()
        .write_scalar(&(steps.iter().sum::<usize>() as u64))
        .unwrap();
    string_attr(&data, "env_args", &format!("{{\"env_name\": \"{env}\"}}"));

    for (i, &n) in steps.iter().enumerate() {
        episode(&data, &format!("demo_{i}"), n);
    }
}

#[derive(hdf5::H5Type, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Contact {
    pub step: i32,
    pub force: f64,
}

/// Add values h5py writes for numpy `bytes_` and structured arrays to an existing
/// demonstration file: a fixed-length string `tag` on `data` and `source` on `demo_0`,
/// and in `demo_0` a compound `contacts` array and a fixed-length string `labels`
/// array stored with the fletcher32 filter.
pub fn add_stored_types(path: &Path) {
    let f = File::open_rw(path).unwrap();
    let data = f.group("data").unwrap();

    data.new_attr::<FixedAscii<8>>()
        .create("tag")
        .unwrap()
        .write_scalar(&FixedAscii::<8>::from_ascii("coffee").unwrap())
        .unwrap();

    let ep = data.group("demo_0").unwrap();
    ep.new_attr::<FixedAscii<16>>()
        .create("source")
        .unwrap()
        .write_scalar(&FixedAscii::<16>::from_ascii("teleop").unwrap())
        .unwrap();

    ep.new_dataset::<Contact>()
        .shape(3)
        .create("contacts")
        .unwrap()
        .write(&[
            Contact { step: 0, force: 0.0 },
            Contact { step: 1, force: 1.5 },
            Contact { step: 2, force: -0.25 },
        ])
        .unwrap();

    let labels =
        ["reach", "grasp", "lift", "place"].map(|l| FixedAscii::<8>::from_ascii(l).unwrap());
    ep.new_dataset::<FixedAscii<8>>()
        .chunk(2)
        .fletcher32()
        .shape(4)
        .create("labels")
        .unwrap()
        .write(&labels)
        .unwrap();
}

/// A file without a `data` group.
pub fn bare_file(path: &Path) {
    let f = File::create(path).unwrap();
    f.create_group("mask").unwrap();
}

fn episode(data: &Group, name: &str, n: usize) {
    let mut rng = rand::thread_rng();
    let g = data.create_group(name).unwrap();

    g.new_attr::<i64>()
        .create("num_samples")
        .unwrap()
        .write_scalar(&(n as i64))
        .unwrap();
    string_attr(&g, "model_file", "<mujoco model=\"base\"/>");

    write(&g, "actions", &Array::from_shape_fn((n, 7), |_| rng.gen_range(-1.0..1.0f64)));
    write(&g, "rewards", &Array::from_shape_fn(n, |i| if i + 1 == n { 1.0f64 } else { 0.0 }));
    write(&g, "dones", &Array::from_shape_fn(n, |i| (i + 1 == n) as i64));

    let obs = g.create_group("obs").unwrap();
    obs.new_dataset::<u8>()
        .chunk((1, 8, 8, 3))
        .deflate(4)
        .shape((n, 8, 8, 3))
        .create("agentview_image")
        .unwrap()
        .write(&Array::from_shape_fn((n, 8, 8, 3), |_| rng.gen::<u8>()))
        .unwrap();
    write(&obs, "robot0_eef_pos", &Array::from_shape_fn((n, 3), |_| rng.gen::<f32>()));

    let states = g
        .new_dataset::<f64>()
        .shape((n, 4))
        .create("states")
        .unwrap();
    states
        .write(&Array::from_shape_fn((n, 4), |_| rng.gen::<f64>()))
        .unwrap();
    string_attr(&states, "model", "robot0");
}

fn write<T: H5Type, D: Dimension>(g: &Group, name: &str, a: &Array<T, D>) {
    g.new_dataset::<T>()
        .shape(a.shape())
        .create(name)
        .unwrap()
        .write(a.view())
        .unwrap();
}

fn string_attr(loc: &hdf5::Location, name: &str, value: &str) {
    loc.new_attr::<VarLenUnicode>()
        .create(name)
        .unwrap()
        .write_scalar(&value.parse::<VarLenUnicode>().unwrap())
        .unwrap();
}

/// Read an array with the plain hdf5 API.
pub fn read<T: H5Type>(f: &File, path: &str) -> ArrayD<T> {
    f.dataset(path).unwrap().read_dyn::<T>().unwrap()
}
