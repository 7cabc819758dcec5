/*
 * @Author       : 老董
 * @Date         : 2026-02-14
 * @Description  : 鸢尾花分类网络的端到端测试
 *                 网络结构：Input(4) -> Normalize -> Dense(8) -> ReLU -> Dense(3) -> SoftMax
 *                 参数写入临时目录下的 csv/npy 文件，再分别通过描述文件和手动 API 构建网络，两者输出须完全一致
 */
use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use ndarray::Array2;
use only_infer::assert_err;
use only_infer::data::DataError;
use only_infer::errors::{NetError, ReportLevel};
use only_infer::nn::{Network, load_network};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 鸢尾花样本（花萼长、花萼宽、花瓣长、花瓣宽）
const SAMPLES: [[f32; 4]; 3] = [
    [5.1, 3.5, 1.4, 0.2],
    [6.4, 3.2, 4.5, 1.5],
    [6.3, 3.3, 6.0, 2.5],
];
const MEANS: [f32; 4] = [5.843, 3.057, 3.758, 1.199];
const SD: [f32; 4] = [0.825, 0.434, 1.759, 0.760];

struct Params {
    w1: Vec<f32>,
    b1: Vec<f32>,
    w2: Vec<f32>,
    b2: Vec<f32>,
}

impl Params {
    fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut draw = |n: usize| (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect::<Vec<f32>>();
        Self {
            w1: draw(8 * 4),
            b1: draw(8),
            w2: draw(3 * 8),
            b2: draw(3),
        }
    }
}

/// 每个测试独占一个临时目录
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("only_infer_it_{}_{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn to_csv(values: &[f32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// 写出参数文件与描述文件，返回描述文件路径
fn write_network_files(dir: &PathBuf, params: &Params) -> PathBuf {
    std::fs::write(dir.join("means.csv"), to_csv(&MEANS)).unwrap();
    std::fs::write(dir.join("sd.txt"), "0.825 0.434\n1.759 0.760\n").unwrap();
    std::fs::write(dir.join("b1.csv"), to_csv(&params.b1)).unwrap();
    std::fs::write(dir.join("b2.csv"), to_csv(&params.b2)).unwrap();
    std::fs::write(dir.join("w1.csv"), to_csv(&params.w1)).unwrap();
    let w2 = Array2::from_shape_vec((3, 8), params.w2.clone()).unwrap();
    ndarray_npy::write_npy(dir.join("w2.npy"), &w2).unwrap();

    let json = r#"{
        "inputs": 4,
        "outputs": 3,
        "layers": [
            { "type": "Normalize", "len": 4, "means": "means.csv", "sd": "sd.txt" },
            { "type": "Dense", "inputs": 4, "outputs": 8, "weights": "w1.csv", "bias": "b1.csv" },
            { "type": "ReLU", "len": 8 },
            { "type": "Dense", "inputs": 8, "outputs": 3, "weights": "w2.npy", "bias": "b2.csv" },
            { "type": "SoftMax", "len": 3 }
        ]
    }"#;
    let path = dir.join("iris.json");
    std::fs::write(&path, json).unwrap();
    path
}

fn build_by_hand(params: &Params) -> Result<Network, NetError> {
    let mut net = Network::new(4);
    net.add_normalize_layer()?.means(&MEANS)?.sd(&SD)?.commit()?;
    net.add_dense_layer(8)?
        .weights(&params.w1)?
        .bias(&params.b1)?
        .commit()?;
    net.add_relu_layer()?;
    net.add_dense_layer(3)?
        .weights(&params.w2)?
        .bias(&params.b2)?
        .commit()?;
    net.add_softmax_layer()?;
    net.finalize()?;
    Ok(net)
}

fn infer(net: &mut Network, sample: &[f32]) -> Result<[f32; 3], NetError> {
    let mut out = [0.0; 3];
    net.copy_to_input(sample)?;
    net.compute()?;
    net.copy_from_output(&mut out)?;
    Ok(out)
}

#[test]
fn test_iris_network_from_descriptor() -> Result<(), NetError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let params = Params::seeded(42);
    let dir = temp_dir("iris");
    let path = write_network_files(&dir, &params);

    let mut loaded = load_network(&path, ReportLevel::Log)?;
    let mut by_hand = build_by_hand(&params)?;
    assert_eq!(loaded.to_string(), by_hand.to_string());

    for sample in &SAMPLES {
        let a = infer(&mut loaded, sample)?;
        let b = infer(&mut by_hand, sample)?;
        assert_eq!(a, b);
        assert_abs_diff_eq!(a.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
    }
    Ok(())
}

#[test]
fn test_iris_network_missing_parameter_file() {
    let params = Params::seeded(7);
    let dir = temp_dir("missing");
    let path = write_network_files(&dir, &params);
    std::fs::remove_file(dir.join("b2.csv")).unwrap();

    let result = load_network(&path, ReportLevel::Silent);
    assert_err!(result, NetError::Load(DataError::SourceNotFound(p)) if p.ends_with("b2.csv"));
}

#[test]
fn test_iris_network_parameter_shortfall() {
    let params = Params::seeded(7);
    let dir = temp_dir("shortfall");
    let path = write_network_files(&dir, &params);
    std::fs::write(dir.join("w1.csv"), to_csv(&params.w1[..30])).unwrap();

    let result = load_network(&path, ReportLevel::Silent);
    assert_err!(
        result,
        NetError::Load(DataError::SourceDataShortfall { expected: 32, got: 30, .. })
    );
}

#[test]
fn test_load_network_bad_descriptor() {
    let dir = temp_dir("bad_descriptor");

    let missing = dir.join("absent.json");
    assert_err!(
        load_network(&missing, ReportLevel::Silent),
        NetError::Load(DataError::SourceNotFound(_))
    );

    let broken = dir.join("broken.json");
    std::fs::write(&broken, r#"{ "inputs": 4, "layers": [ { "type": "Dense" "#).unwrap();
    assert_err!(
        load_network(&broken, ReportLevel::Silent),
        NetError::Descriptor(_)
    );
}
