//! The built-in unit table.

use crate::{Dimension as D, UnitDef as U};

const PI: f64 = std::f64::consts::PI;
const INCH: f64 = 0.0254;
const FOOT: f64 = 0.3048;
const POUND: f64 = 0.453_592_37;
const GRAVITY: f64 = 9.806_65;
const GALLON: f64 = 3.785_411_784e-3;
const CALORIE: f64 = 4.184;

/// Every unit known to the default registry.
pub const DEFAULT_UNITS: &[U] = &[
    // length
    U::new("meter", D::LENGTH, 1.0).symbol("m").aliases(&["metre"]).prefixable(),
    U::new("angstrom", D::LENGTH, 1e-10).symbol("Å").aliases(&["ångström"]),
    U::new("micron", D::LENGTH, 1e-6).symbol("µ").aliases(&["microns"]),
    U::new("fermi", D::LENGTH, 1e-15),
    U::new("inch", D::LENGTH, INCH).symbol("in").aliases(&["inches"]),
    U::new("foot", D::LENGTH, FOOT).symbol("ft").aliases(&["feet"]),
    U::new("yard", D::LENGTH, 3.0 * FOOT).symbol("yd"),
    U::new("mile", D::LENGTH, 5280.0 * FOOT).symbol("mi"),
    U::new("mil", D::LENGTH, 1e-3 * INCH).aliases(&["thou"]),
    U::new("hand", D::LENGTH, 4.0 * INCH),
    U::new("point", D::LENGTH, INCH / 72.0).symbol("pt"),
    U::new("pica", D::LENGTH, INCH / 6.0),
    U::new("fathom", D::LENGTH, 6.0 * FOOT),
    U::new("chain", D::LENGTH, 66.0 * FOOT),
    U::new("furlong", D::LENGTH, 660.0 * FOOT),
    U::new("league", D::LENGTH, 15_840.0 * FOOT),
    U::new("nautical_mile", D::LENGTH, 1852.0).symbol("nmi"),
    U::new("US_survey_foot", D::LENGTH, 1200.0 / 3937.0),
    U::new("US_survey_mile", D::LENGTH, 5280.0 * 1200.0 / 3937.0),
    U::new("astronomical_unit", D::LENGTH, 149_597_870_700.0).symbol("au"),
    U::new("light_year", D::LENGTH, 9_460_730_472_580_800.0)
        .symbol("ly")
        .aliases(&["lightyear"]),
    U::new("parsec", D::LENGTH, 3.085_677_581_491_367e16)
        .symbol("pc")
        .prefixable(),
    U::new("planck_length", D::LENGTH, 1.616_255e-35),
    // mass
    U::new("gram", D::MASS, 1e-3).symbol("g").aliases(&["gramme"]).prefixable(),
    U::new("tonne", D::MASS, 1e3)
        .symbol("t")
        .aliases(&["metric_ton"])
        .prefixable(),
    U::new("pound", D::MASS, POUND).symbol("lb"),
    U::new("ounce", D::MASS, POUND / 16.0).symbol("oz"),
    U::new("dram", D::MASS, POUND / 256.0).symbol("dr"),
    U::new("grain", D::MASS, POUND / 7000.0).symbol("gr"),
    U::new("stone", D::MASS, 14.0 * POUND),
    U::new("short_ton", D::MASS, 2000.0 * POUND),
    U::new("long_ton", D::MASS, 2240.0 * POUND),
    U::new("troy_ounce", D::MASS, 480.0 * POUND / 7000.0).symbol("toz"),
    U::new("carat", D::MASS, 2e-4).symbol("ct"),
    U::new("slug", D::MASS, GRAVITY * POUND / FOOT),
    U::new("dalton", D::MASS, 1.660_539_066_60e-27)
        .symbol("Da")
        .aliases(&["atomic_mass_unit", "amu"]),
    // time
    U::new("second", D::TIME, 1.0).symbol("s").aliases(&["sec"]).prefixable(),
    U::new("minute", D::TIME, 60.0).symbol("min"),
    U::new("hour", D::TIME, 3600.0).symbol("h").aliases(&["hr"]),
    U::new("day", D::TIME, 86_400.0).symbol("d"),
    U::new("week", D::TIME, 604_800.0),
    U::new("fortnight", D::TIME, 1_209_600.0),
    U::new("year", D::TIME, 31_557_600.0)
        .symbol("a")
        .aliases(&["julian_year"]),
    U::new("month", D::TIME, 31_557_600.0 / 12.0),
    U::new("decade", D::TIME, 315_576_000.0),
    U::new("century", D::TIME, 3_155_760_000.0).aliases(&["centuries"]),
    U::new("millennium", D::TIME, 31_557_600_000.0).aliases(&["millennia"]),
    // temperature
    U::new("kelvin", D::TEMPERATURE, 1.0).symbol("K").prefixable(),
    U::new("degree_Celsius", D::TEMPERATURE, 1.0)
        .symbol("degC")
        .aliases(&["celsius", "°C"])
        .offset(273.15),
    U::new("degree_Fahrenheit", D::TEMPERATURE, 5.0 / 9.0)
        .symbol("degF")
        .aliases(&["fahrenheit", "°F"])
        .offset(255.372_222_222_222_2),
    U::new("degree_Rankine", D::TEMPERATURE, 5.0 / 9.0)
        .symbol("degR")
        .aliases(&["rankine"]),
    U::new("delta_degree_Celsius", D::TEMPERATURE, 1.0).symbol("delta_degC"),
    U::new("delta_degree_Fahrenheit", D::TEMPERATURE, 5.0 / 9.0).symbol("delta_degF"),
    // electric current and charge
    U::new("ampere", D::CURRENT, 1.0).symbol("A").aliases(&["amp"]).prefixable(),
    U::new("coulomb", D::CHARGE, 1.0).symbol("C").prefixable(),
    U::new("ampere_hour", D::CHARGE, 3600.0).symbol("Ah"),
    U::new("volt", D::VOLTAGE, 1.0).symbol("V").prefixable(),
    U::new("ohm", D::RESISTANCE, 1.0).symbol("Ω").prefixable(),
    U::new("farad", D::CAPACITANCE, 1.0).symbol("F").prefixable(),
    U::new("henry", D::INDUCTANCE, 1.0).symbol("H").prefixable(),
    U::new("siemens", D::CONDUCTANCE, 1.0).symbol("S").prefixable(),
    U::new("weber", D::MAGNETIC_FLUX, 1.0).symbol("Wb").prefixable(),
    U::new("tesla", D::MAGNETIC_FLUX_DENSITY, 1.0).symbol("T").prefixable(),
    U::new("gauss", D::MAGNETIC_FLUX_DENSITY, 1e-4).symbol("G"),
    // amount of substance and luminosity
    U::new("mole", D::AMOUNT, 1.0).symbol("mol").prefixable(),
    U::new("candela", D::LUMINOSITY, 1.0).symbol("cd").prefixable(),
    U::new("lumen", D::LUMINOSITY, 1.0).symbol("lm").prefixable(),
    U::new("lux", D::ILLUMINANCE, 1.0).symbol("lx").prefixable(),
    // angles and ratios
    U::new("radian", D::DIMENSIONLESS, 1.0).symbol("rad").prefixable(),
    U::new("steradian", D::DIMENSIONLESS, 1.0).symbol("sr"),
    U::new("degree", D::DIMENSIONLESS, PI / 180.0).symbol("deg"),
    U::new("arcminute", D::DIMENSIONLESS, PI / 10_800.0).symbol("arcmin"),
    U::new("arcsecond", D::DIMENSIONLESS, PI / 648_000.0).symbol("arcsec"),
    U::new("gradian", D::DIMENSIONLESS, PI / 200.0).symbol("grad"),
    U::new("turn", D::DIMENSIONLESS, 2.0 * PI).aliases(&["revolution", "cycle"]),
    U::new("percent", D::DIMENSIONLESS, 1e-2).symbol("%"),
    U::new("permille", D::DIMENSIONLESS, 1e-3).symbol("‰"),
    U::new("ppm", D::DIMENSIONLESS, 1e-6),
    U::new("dozen", D::DIMENSIONLESS, 12.0),
    U::new("gross", D::DIMENSIONLESS, 144.0),
    // area
    U::new("are", D::AREA, 100.0),
    U::new("hectare", D::AREA, 10_000.0).symbol("ha"),
    U::new("acre", D::AREA, 43_560.0 * FOOT * FOOT),
    U::new("barn", D::AREA, 1e-28).symbol("b").prefixable(),
    U::new("circular_mil", D::AREA, PI / 4.0 * 1e-6 * INCH * INCH).symbol("cmil"),
    // volume
    U::new("liter", D::VOLUME, 1e-3)
        .symbol("l")
        .aliases(&["L", "litre"])
        .prefixable(),
    U::new("cubic_centimeter", D::VOLUME, 1e-6).symbol("cc"),
    U::new("gallon", D::VOLUME, GALLON).symbol("gal"),
    U::new("quart", D::VOLUME, GALLON / 4.0).symbol("qt"),
    U::new("pint", D::VOLUME, GALLON / 8.0),
    U::new("cup", D::VOLUME, GALLON / 16.0),
    U::new("fluid_ounce", D::VOLUME, GALLON / 128.0).symbol("floz"),
    U::new("tablespoon", D::VOLUME, GALLON / 256.0).symbol("tbsp"),
    U::new("teaspoon", D::VOLUME, GALLON / 768.0).symbol("tsp"),
    U::new("imperial_gallon", D::VOLUME, 4.546_09e-3),
    U::new("imperial_pint", D::VOLUME, 4.546_09e-3 / 8.0),
    U::new("oil_barrel", D::VOLUME, 42.0 * GALLON).symbol("bbl"),
    U::new("bushel", D::VOLUME, 35.239_070_166_88e-3).symbol("bu"),
    // velocity and acceleration
    U::new("knot", D::VELOCITY, 1852.0 / 3600.0).symbol("kt"),
    U::new("mile_per_hour", D::VELOCITY, 5280.0 * FOOT / 3600.0).symbol("mph"),
    U::new("kilometer_per_hour", D::VELOCITY, 1000.0 / 3600.0).symbol("kph"),
    U::new("speed_of_light", D::VELOCITY, 299_792_458.0).symbol("c"),
    U::new("standard_gravity", D::ACCELERATION, GRAVITY).symbol("g_0"),
    U::new("galileo", D::ACCELERATION, 1e-2).symbol("Gal"),
    // force
    U::new("newton", D::FORCE, 1.0).symbol("N").prefixable(),
    U::new("dyne", D::FORCE, 1e-5).symbol("dyn"),
    U::new("pound_force", D::FORCE, GRAVITY * POUND).symbol("lbf"),
    U::new("kilogram_force", D::FORCE, GRAVITY).symbol("kgf"),
    U::new("poundal", D::FORCE, POUND * FOOT).symbol("pdl"),
    // energy
    U::new("joule", D::ENERGY, 1.0).symbol("J").prefixable(),
    U::new("erg", D::ENERGY, 1e-7),
    U::new("calorie", D::ENERGY, CALORIE).symbol("cal").prefixable(),
    U::new("electron_volt", D::ENERGY, 1.602_176_634e-19)
        .symbol("eV")
        .prefixable(),
    U::new("watt_hour", D::ENERGY, 3600.0).symbol("Wh").prefixable(),
    U::new("british_thermal_unit", D::ENERGY, 1_055.055_852_62).symbol("Btu"),
    U::new("therm", D::ENERGY, 1.055_055_852_62e8),
    U::new("foot_pound", D::ENERGY, FOOT * GRAVITY * POUND).symbol("ft_lb"),
    U::new("ton_TNT", D::ENERGY, 4.184e9).symbol("tTNT"),
    // power
    U::new("watt", D::POWER, 1.0).symbol("W").prefixable(),
    U::new("horsepower", D::POWER, 550.0 * FOOT * GRAVITY * POUND).symbol("hp"),
    U::new("metric_horsepower", D::POWER, 75.0 * GRAVITY),
    // pressure
    U::new("pascal", D::PRESSURE, 1.0).symbol("Pa").prefixable(),
    U::new("bar", D::PRESSURE, 1e5).prefixable(),
    U::new("atmosphere", D::PRESSURE, 101_325.0).symbol("atm"),
    U::new("torr", D::PRESSURE, 101_325.0 / 760.0).symbol("Torr"),
    U::new("psi", D::PRESSURE, GRAVITY * POUND / (INCH * INCH)),
    U::new("millimeter_Hg", D::PRESSURE, 133.322_387_415).symbol("mmHg"),
    U::new("inch_Hg", D::PRESSURE, 3_386.388_666_6).symbol("inHg"),
    // frequency
    U::new("hertz", D::FREQUENCY, 1.0).symbol("Hz").prefixable(),
    U::new("revolutions_per_minute", D::FREQUENCY, 1.0 / 60.0).symbol("rpm"),
    // radiation
    U::new("becquerel", D::FREQUENCY, 1.0).symbol("Bq").prefixable(),
    U::new("curie", D::FREQUENCY, 3.7e10).symbol("Ci"),
    U::new("gray", D::ABSORBED_DOSE, 1.0).symbol("Gy").prefixable(),
    U::new("sievert", D::ABSORBED_DOSE, 1.0).symbol("Sv").prefixable(),
    U::new("rem", D::ABSORBED_DOSE, 1e-2),
    // viscosity
    U::new("poise", D::DYNAMIC_VISCOSITY, 0.1).symbol("P").prefixable(),
    U::new("stokes", D::KINEMATIC_VISCOSITY, 1e-4).symbol("St").prefixable(),
    // information
    U::new("bit", D::INFORMATION, 1.0).prefixable(),
    U::new("byte", D::INFORMATION, 8.0)
        .symbol("B")
        .aliases(&["octet"])
        .prefixable(),
];
