use crate::{
    coil::{CoilGeometry, CoilModel, CoilResult},
    unit::LengthUnit,
};
use chrono::Local;
use std::fmt;

const INPUT_WIDTH: usize = 28;
const RESULT_WIDTH: usize = 55;

/// Human-readable report of one calculation
pub struct Summary<'a>(pub &'a CoilModel);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let g = model.geometry();
        let r = model.result();

        writeln!(f, "# rfcoil v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(f, "{}", Local::now().format("#   Coil design %Y-%m-%d %H:%M"))?;

        let w = INPUT_WIDTH;
        writeln!(f, "# \nINPUT")?;
        writeln!(f, "#   {:w$} D = {} mm", "mean diameter of the coil", g.diameter)?;
        writeln!(f, "#   {:w$} N = {}", "number of turns", g.turns)?;
        writeln!(f, "#   {:w$} ℓ = {} mm", "length of the coil", g.length)?;
        writeln!(f, "#   {:w$} d = {} mm", "wire or tubing diameter", g.wire_diameter)?;
        writeln!(f, "#   {:w$} f = {} MHz", "design frequency", g.frequency)?;
        match model.plating() {
            Some(plating) => writeln!(f, "#   The (plating) material is {}.", plating.description)?,
            None => writeln!(f, "#   The (plating) material index {} is unknown.", g.plating)?,
        }

        if model.winding().is_none() {
            writeln!(f, "# \n# ****{}", r.error_msg)?;
            return writeln!(f, "#     No results are available.");
        }

        writeln!(f, "# \nINTERMEDIATE RESULTS")?;
        writeln!(f, "#   {:w$} p = {:.2} mm", "winding pitch", r.p)?;
        writeln!(f, "#   {:w$} Φ = {:.2}", "proximity factor", r.phi)?;
        writeln!(f, "#   {:w$} D_eff = {:.2} mm", "effective diameter", r.d_eff)?;
        writeln!(f, "#   {:w$} ℓ_w_phys = {:.1} mm", "physical conductor length", r.l_w_phys)?;
        writeln!(f, "#   {:w$} ℓ_w_eff = {:.1} mm", "effective conductor length", r.l_w_eff)?;
        writeln!(f, "#   {:w$} δ_i = {:.2} µm", "skin depth", r.delta_i)?;
        writeln!(f, "#   {:w$} ψ = {:.2}°", "effective pitch angle", r.psi)?;

        let w = RESULT_WIDTH;
        writeln!(f, "# \nRESULTS")?;
        if model.effective().is_some() {
            writeln!(f, "#   Effective equivalent circuit")?;
            let rows = [
                ("effective series inductance @ design frequency", "L_eff_s", format!("{:.3} μH", r.l_eff_s)),
                ("effective series reactance @ design frequency", "X_eff_s", format!("{:.1} Ω", r.x_eff_s)),
                ("effective series AC resistance @ design frequency", "R_eff_s", format!("{:.3} Ω", r.r_eff_s)),
                ("effective unloaded quality factor @ design frequency", "Q_eff  ", format!("{:.0}", r.q_eff.trunc())),
            ];
            for (label, symbol, val) in rows {
                writeln!(f, "#     {:w$} {} = {}", label, symbol, val)?;
            }
        }

        writeln!(f, "#   Lumped circuit equivalent")?;
        writeln!(
            f,
            "#     {:w$} L_s     = {:.3} μH",
            "f-independent series inductance; geometrical formula", r.l_s
        )?;
        if model.lumped().is_some() {
            writeln!(f, "#     {:w$} R_s     = {:.3} Ω", "series AC resistance @ design frequency", r.r_s)?;
            writeln!(f, "#     {:w$} C_p     = {:.1} pF", "parallel stray capacitance @ design frequency", r.c_p)?;
        }
        if model.f_res().is_some() {
            let w = RESULT_WIDTH + 2;
            writeln!(f, "#   {:w$} f_res   = {:.3} MHz", "self-resonant frequency", r.f_res)?;
        }

        for error in model.stage_errors() {
            writeln!(f, "# \n# ****{}", error)?;
            writeln!(f, "#     However, all shown results are usable.")?;
        }
        Ok(())
    }
}

pub fn summary(model: &CoilModel) -> String {
    Summary(model).to_string()
}

/// Comment block opening a CSV sweep for `target` µH
pub fn csv_header(target: f64, geometry: &CoilGeometry, extra: &[String]) -> String {
    let mut lines = vec![
        Local::now().format("# rfcoil scan %Y-%m-%d %H:%M").to_string(),
        "#".to_string(),
        format!(
            "# LTarget = {}, d = {}, D = {}, f = {}",
            target, geometry.wire_diameter, geometry.diameter, geometry.frequency
        ),
        "#".to_string(),
    ];
    lines.extend(extra.iter().map(|line| format!("# {}", line)));
    if !extra.is_empty() {
        lines.push("#".to_string());
    }
    lines.join("\n") + "\n"
}

pub fn csv_column_header(unit: LengthUnit) -> String {
    format!(
        "# D(mm),   l(mm), Q(plot),      Q,       N,    L(uH), wLen({}), Res(MHz), pitch(mm), Err, Cmd",
        unit
    )
}

/// One CSV row; `Q(plot)` is NaN for records with an error so plotting tools skip them
pub fn csv_line(result: &CoilResult, unit: LengthUnit) -> String {
    let plot_q = if result.is_ok() { result.q_eff } else { f64::NAN };
    let wire_length = unit.from_mm(result.l_w_phys);
    format!(
        "{:7.2}, {:7.2}, {:7.0}, {:7.0}  {:6.2}, {:8.2}, {:8.2}, {:8.2}, {:9.2}, {:3}, \"{}\"",
        result.diameter,
        result.length,
        plot_q,
        result.q_eff,
        result.turns,
        result.l_eff_s,
        wire_length,
        result.f_res,
        result.p,
        result.error_code,
        command_line(result)
    )
}

/// `rfcoil calc` invocation reproducing `result`
pub fn command_line(result: &CoilResult) -> String {
    let mut cmd = format!(
        "rfcoil calc --diameter={:.3} --length={:.3} --turns={:.3} --wire={:.3} --frequency={:.3}",
        result.diameter, result.length, result.turns, result.wire_diameter, result.frequency
    );
    if result.plating != 0 {
        cmd.push_str(&format!(" --plating={}", result.plating));
    }
    cmd
}
